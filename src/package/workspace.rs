//! Monorepo and workspace support.
//!
//! Expands the `workspaces` globs of a root package.json into the workspace
//! packages they match. Both the array form and the `{ "packages": [...] }`
//! form of the field are supported.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, warn};

use super::manifest::{read_manifest, MANIFEST_FILE};
use super::types::Manifest;
use crate::error::{NpsError, Result};

/// A workspace package found through the root manifest's globs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceEntry {
    /// Name of the workspace package.
    name: String,
    /// Path to the workspace directory.
    dir: PathBuf,
    /// The workspace's own package.json.
    manifest: Manifest,
}

impl WorkspaceEntry {
    /// Create a new workspace entry.
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>, manifest: Manifest) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            manifest,
        }
    }

    /// Get the workspace name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the workspace directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the workspace manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Check if the workspace has scripts.
    pub fn has_scripts(&self) -> bool {
        self.manifest.has_scripts()
    }
}

/// Workspaces keyed by package name.
pub type Workspaces = BTreeMap<String, WorkspaceEntry>;

/// `*` must not cross a path separator.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Expand the workspaces declared by `root` into a map keyed by name.
///
/// Patterns are matched relative to the root manifest's directory, in
/// declaration order. Patterns starting with `!` exclude directories matched
/// by any positive pattern. A workspace without a `name` is keyed by its
/// directory name. When two workspaces share a name, the one matched last
/// replaces the earlier one.
///
/// Candidates whose package.json is missing or broken are skipped.
///
/// # Errors
///
/// Returns [`NpsError::NoWorkspacesDeclared`] when `root` has no
/// `workspaces` field.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use npm_scripts::package::{expand_workspaces, read_manifest};
///
/// let root = read_manifest(Path::new("package.json")).unwrap();
/// for (name, entry) in expand_workspaces(&root).unwrap() {
///     println!("{name}: {}", entry.dir().display());
/// }
/// ```
pub fn expand_workspaces(root: &Manifest) -> Result<Workspaces> {
    let patterns = root
        .workspaces()
        .ok_or_else(|| NpsError::NoWorkspacesDeclared {
            path: root.path().to_path_buf(),
        })?;

    let root_dir = root.dir();
    let (includes, excludes) = split_patterns(patterns);
    let mut workspaces = Workspaces::new();

    for pattern in includes {
        for dir in expand_pattern(root_dir, pattern) {
            if is_excluded(root_dir, &dir, &excludes) {
                debug!(dir = %dir.display(), "workspace excluded by negated pattern");
                continue;
            }

            let Some(entry) = load_workspace(&dir) else {
                continue;
            };

            if let Some(previous) = workspaces.insert(entry.name.clone(), entry) {
                if let Some(current) = workspaces.get(previous.name()) {
                    if current.dir() != previous.dir() {
                        debug!(
                            name = %previous.name(),
                            replaced = %previous.dir().display(),
                            by = %current.dir().display(),
                            "duplicate workspace name, keeping the later one"
                        );
                    }
                }
            }
        }
    }

    debug!(count = workspaces.len(), "workspaces expanded");
    Ok(workspaces)
}

/// Split patterns into positive globs and compiled `!` exclusions.
fn split_patterns(patterns: &[String]) -> (Vec<&str>, Vec<Pattern>) {
    let mut includes = Vec::new();
    let mut excludes = Vec::new();

    for pattern in patterns {
        match pattern.strip_prefix('!') {
            Some(negated) => match Pattern::new(&normalize_pattern(negated)) {
                Ok(compiled) => excludes.push(compiled),
                Err(e) => warn!(pattern = %pattern, error = %e, "skipping invalid workspace pattern"),
            },
            None => includes.push(pattern.as_str()),
        }
    }

    (includes, excludes)
}

/// Expand one positive pattern to the directories it matches.
fn expand_pattern(root_dir: &Path, pattern: &str) -> Vec<PathBuf> {
    let base = Pattern::escape(&root_dir.to_string_lossy());
    let full = format!("{}/{}", base.trim_end_matches('/'), normalize_pattern(pattern));

    match glob::glob_with(&full, MATCH_OPTIONS) {
        Ok(paths) => paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    debug!(error = %e, "unreadable path while expanding workspaces");
                    None
                }
            })
            .filter(|path| path.is_dir())
            .collect(),
        Err(e) => {
            warn!(pattern = %pattern, error = %e, "skipping invalid workspace pattern");
            Vec::new()
        }
    }
}

/// Strip a leading `./` and trailing slashes so patterns join cleanly.
fn normalize_pattern(pattern: &str) -> String {
    let trimmed = pattern.strip_prefix("./").unwrap_or(pattern);
    trimmed.trim_end_matches('/').to_string()
}

fn is_excluded(root_dir: &Path, dir: &Path, excludes: &[Pattern]) -> bool {
    let relative = dir.strip_prefix(root_dir).unwrap_or(dir);
    excludes
        .iter()
        .any(|pattern| pattern.matches_path_with(relative, MATCH_OPTIONS))
}

/// Load the workspace in `dir`, or `None` if its package.json is unusable.
fn load_workspace(dir: &Path) -> Option<WorkspaceEntry> {
    let path = dir.join(MANIFEST_FILE);
    if !path.is_file() {
        debug!(dir = %dir.display(), "no package.json in workspace candidate");
        return None;
    }

    let manifest = match read_manifest(&path) {
        Ok(manifest) => manifest,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "skipping unreadable workspace");
            return None;
        }
    };

    // Fall back to the directory name for packages without a name
    let name = manifest
        .name()
        .map(String::from)
        .or_else(|| dir.file_name().map(|n| n.to_string_lossy().into_owned()))?;

    Some(WorkspaceEntry::new(name, dir, manifest))
}
