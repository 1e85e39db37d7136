//! Path utilities.

use std::path::{Path, PathBuf};

/// Project config file name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = ".npsrc.toml";

/// Upper bound for upward searches: the user's home directory.
///
/// The boundary is canonicalized so it compares equal to canonicalized
/// search paths. `None` means searches run to the filesystem root.
pub fn search_boundary() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.canonicalize().unwrap_or(home))
}

/// Iterate `start` and its ancestors, stopping after `boundary`.
///
/// The boundary itself is yielded; nothing above it is. When `start` is not
/// below `boundary` the iteration runs to the filesystem root.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use npm_scripts::utils::ancestors_within;
///
/// let dirs: Vec<_> = ancestors_within(Path::new("/home/me/app/src"), Some(Path::new("/home/me")))
///     .collect();
/// assert_eq!(
///     dirs,
///     vec![Path::new("/home/me/app/src"), Path::new("/home/me/app"), Path::new("/home/me")]
/// );
/// ```
pub fn ancestors_within<'a>(
    start: &'a Path,
    boundary: Option<&'a Path>,
) -> impl Iterator<Item = &'a Path> + 'a {
    let mut passed_boundary = false;
    start
        .ancestors()
        .filter(|dir| !dir.as_os_str().is_empty())
        .take_while(move |dir| {
            if passed_boundary {
                return false;
            }
            if boundary.is_some_and(|b| *dir == b) {
                passed_boundary = true;
            }
            true
        })
}

/// Get the config directory for nps.
///
/// Returns `~/.config/nps` on Unix-like systems.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("nps"))
}

/// Get the global config file path.
///
/// Returns `~/.config/nps/config.toml`.
pub fn global_config_file() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Get the project config file path.
///
/// Returns `<project_dir>/.npsrc.toml`, whether or not it exists.
pub fn local_config_file(project_dir: &Path) -> PathBuf {
    project_dir.join(LOCAL_CONFIG_FILE)
}
