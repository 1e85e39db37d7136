//! Locating the manifest for the current directory or for a file.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::manifest::{read_manifest, MANIFEST_FILE};
use super::types::Manifest;
use crate::error::Result;
use crate::utils::{ancestors_within, search_boundary};

/// Load the `package.json` that sits directly in `cwd`.
///
/// No upward search is done. A missing file is `Ok(None)`, which callers
/// report as a notice; a file that exists but does not parse is an error.
///
/// # Errors
///
/// Returns [`NpsError::ParseError`](crate::error::NpsError::ParseError) or
/// [`NpsError::NotReadable`](crate::error::NpsError::NotReadable) for a
/// broken manifest.
pub fn resolve_root(cwd: &Path) -> Result<Option<Manifest>> {
    let path = cwd.join(MANIFEST_FILE);
    if !path.is_file() {
        debug!(dir = %cwd.display(), "no root package.json");
        return Ok(None);
    }

    read_manifest(&path).map(Some)
}

/// Find the closest `package.json` at or above `file_path`.
///
/// The search is bounded by the user's home directory.
///
/// # Errors
///
/// Returns an error if the closest manifest cannot be read or parsed.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use npm_scripts::package::resolve_from;
///
/// if let Some(manifest) = resolve_from(Path::new("packages/web/src/main.ts")).unwrap() {
///     println!("closest manifest: {}", manifest.path().display());
/// }
/// ```
pub fn resolve_from(file_path: &Path) -> Result<Option<Manifest>> {
    let boundary = search_boundary();
    resolve_from_within(file_path, boundary.as_deref())
}

/// Find the closest `package.json` at or above `file_path`, never looking
/// above `boundary`.
///
/// Starts from `file_path` itself when it is a directory and from its parent
/// otherwise. Each step moves up exactly one directory.
///
/// # Errors
///
/// Returns an error if the closest manifest cannot be read or parsed.
pub fn resolve_from_within(file_path: &Path, boundary: Option<&Path>) -> Result<Option<Manifest>> {
    match find_manifest_within(file_path, boundary) {
        Some(path) => read_manifest(&path).map(Some),
        None => Ok(None),
    }
}

/// Path of the closest `package.json` at or above `file_path`.
///
/// A relative `file_path` is taken from the current directory, whether or
/// not the file exists yet.
pub fn find_manifest_within(file_path: &Path, boundary: Option<&Path>) -> Option<PathBuf> {
    let cwd = std::env::current_dir().unwrap_or_default();
    find_manifest_from(file_path, &cwd, boundary)
}

fn find_manifest_from(file_path: &Path, cwd: &Path, boundary: Option<&Path>) -> Option<PathBuf> {
    let absolute = absolutize(file_path, cwd);

    let start = if absolute.is_dir() {
        absolute.as_path()
    } else {
        absolute.parent().unwrap_or(absolute.as_path())
    };

    let found = ancestors_within(start, boundary)
        .map(|dir| dir.join(MANIFEST_FILE))
        .find(|candidate| candidate.is_file());

    match &found {
        Some(path) => debug!(from = %file_path.display(), manifest = %path.display(), "closest package.json"),
        None => debug!(from = %file_path.display(), "no package.json above file"),
    }

    found
}

/// Absolute, symlink-free form of `path`. The part that does not exist yet
/// is appended to the canonical form of its deepest existing ancestor.
fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if let Ok(real) = path.canonicalize() {
        return real;
    }

    let joined = cwd.join(path);
    for ancestor in joined.ancestors() {
        if let (Ok(real), Ok(rest)) = (ancestor.canonicalize(), joined.strip_prefix(ancestor)) {
            return real.join(rest);
        }
    }
    joined
}
