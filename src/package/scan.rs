//! Bulk discovery of every package.json under a directory.
//!
//! Discovery never enters a `node_modules` directory. Every discovered file
//! ends up either parsed or recorded as a failure, so one broken manifest
//! does not hide the others.

use std::io;
use std::num::NonZeroUsize;
use std::path::{Component, Path, PathBuf};
use std::process::Command;
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::manifest::{read_manifest, MANIFEST_FILE};
use super::types::Manifest;

/// Directory name that is never descended into.
pub const PRUNED_DIR: &str = "node_modules";

/// How manifests are discovered on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStrategy {
    /// Use `fd` when it is installed, otherwise walk the tree.
    #[default]
    Auto,
    /// Recursive directory walk.
    Walk,
    /// The external `fd` finder.
    Fd,
}

impl std::fmt::Display for ScanStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanStrategy::Auto => write!(f, "auto"),
            ScanStrategy::Walk => write!(f, "walk"),
            ScanStrategy::Fd => write!(f, "fd"),
        }
    }
}

impl std::str::FromStr for ScanStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ScanStrategy::Auto),
            "walk" => Ok(ScanStrategy::Walk),
            "fd" => Ok(ScanStrategy::Fd),
            _ => Err(format!(
                "Unknown scan strategy: '{s}'. Valid options are: auto, walk, fd"
            )),
        }
    }
}

/// A discovered manifest that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPath {
    /// Path of the manifest.
    pub path: PathBuf,
    /// Why it could not be loaded.
    pub reason: String,
}

/// Result of a bulk scan.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Manifests that parsed, sorted by path.
    pub manifests: Vec<Manifest>,
    /// Manifests that did not, sorted by path.
    pub failures: Vec<FailedPath>,
}

impl ScanReport {
    /// Total number of discovered manifest files.
    pub fn discovered(&self) -> usize {
        self.manifests.len() + self.failures.len()
    }

    /// Check if nothing was discovered.
    pub fn is_empty(&self) -> bool {
        self.discovered() == 0
    }

    /// Check if some manifests failed to load.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Discover and parse every package.json under `root_dir`.
///
/// Parsing happens on a pool of scoped worker threads; the report is built
/// only after every read has finished.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use npm_scripts::package::{scan_manifests, ScanStrategy};
///
/// let report = scan_manifests(Path::new("."), ScanStrategy::Auto);
/// println!("{} parsed, {} failed", report.manifests.len(), report.failures.len());
/// ```
pub fn scan_manifests(root_dir: &Path, strategy: ScanStrategy) -> ScanReport {
    let paths = discover_manifests(root_dir, strategy);
    debug!(root = %root_dir.display(), count = paths.len(), "manifests discovered");
    parse_manifests(paths)
}

/// List every package.json path under `root_dir`, sorted.
pub fn discover_manifests(root_dir: &Path, strategy: ScanStrategy) -> Vec<PathBuf> {
    let mut paths = match strategy {
        ScanStrategy::Walk => walk_manifests(root_dir),
        ScanStrategy::Fd => match find_fd() {
            Some(fd) => fd_manifests(&fd, root_dir).unwrap_or_else(|e| {
                warn!(error = %e, "fd failed, walking the tree instead");
                walk_manifests(root_dir)
            }),
            None => {
                warn!("fd not found on PATH, walking the tree instead");
                walk_manifests(root_dir)
            }
        },
        ScanStrategy::Auto => match find_fd() {
            Some(fd) => fd_manifests(&fd, root_dir).unwrap_or_else(|e| {
                debug!(error = %e, "fd failed, walking the tree instead");
                walk_manifests(root_dir)
            }),
            None => walk_manifests(root_dir),
        },
    };

    paths.retain(|path| !is_pruned(path.strip_prefix(root_dir).unwrap_or(path)));
    paths.sort();
    paths.dedup();
    paths
}

/// Walk the tree, skipping `node_modules` subtrees.
fn walk_manifests(root_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(root_dir)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !(e.file_type().is_dir() && e.file_name() == PRUNED_DIR))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file() && e.file_name() == MANIFEST_FILE)
        .map(|e| e.into_path())
        .collect()
}

/// Locate the `fd` binary. Debian and Ubuntu install it as `fdfind`.
fn find_fd() -> Option<PathBuf> {
    which::which("fd").or_else(|_| which::which("fdfind")).ok()
}

fn fd_manifests(fd: &Path, root_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let output = Command::new(fd)
        .args([
            "--no-ignore",
            "--hidden",
            "--exclude",
            PRUNED_DIR,
            "--glob",
            MANIFEST_FILE,
            "--type",
            "f",
        ])
        .arg(root_dir)
        .output()?;

    if !output.status.success() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!(
                "fd exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .filter(|path| path.file_name().is_some_and(|name| name == MANIFEST_FILE))
        .collect())
}

/// Whether any directory component of `path` is `node_modules`.
fn is_pruned(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == PRUNED_DIR))
}

/// Parse `paths` in parallel and split the results.
pub fn parse_manifests(paths: Vec<PathBuf>) -> ScanReport {
    let workers = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    let chunk_size = ((paths.len() + workers - 1) / workers).max(1);

    let results: Vec<Result<Manifest, FailedPath>> = thread::scope(|scope| {
        let handles: Vec<_> = paths
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move || chunk.iter().map(|p| load(p)).collect::<Vec<_>>()))
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    });

    let mut report = ScanReport::default();
    for result in results {
        match result {
            Ok(manifest) => report.manifests.push(manifest),
            Err(failure) => report.failures.push(failure),
        }
    }
    report.manifests.sort_by(|a, b| a.path().cmp(b.path()));
    report.failures.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(
        parsed = report.manifests.len(),
        failed = report.failures.len(),
        "bulk scan finished"
    );
    report
}

fn load(path: &Path) -> Result<Manifest, FailedPath> {
    read_manifest(path).map_err(|e| FailedPath {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
