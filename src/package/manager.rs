//! Package manager inference and command building.
//!
//! The package manager for a directory is inferred from lock files found in
//! that directory or the closest ancestor that has one, never searching above
//! the user's home directory. Without a lock file the answer is npm.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::Manifest;
use crate::utils::{ancestors_within, search_boundary};

/// Supported package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// Node Package Manager (npm)
    #[default]
    Npm,
    /// Yarn package manager
    Yarn,
    /// pnpm - Fast, disk space efficient package manager
    Pnpm,
    /// Bun - Fast all-in-one JavaScript runtime
    Bun,
}

/// Lock files in tie-break order: the first name present in a directory wins.
const LOCK_FILES: &[(&str, PackageManager)] = &[
    ("bun.lock", PackageManager::Bun),
    ("bun.lockb", PackageManager::Bun),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("package-lock.json", PackageManager::Npm),
];

impl PackageManager {
    /// Get the executable name for this package manager.
    pub fn executable(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Get the command to run a script as a vector of arguments.
    ///
    /// Every supported tool accepts the `run` form, so the shape is the same
    /// for all of them.
    ///
    /// # Examples
    ///
    /// ```
    /// use npm_scripts::package::PackageManager;
    ///
    /// assert_eq!(PackageManager::Npm.run_command("dev"), vec!["npm", "run", "dev"]);
    /// assert_eq!(PackageManager::Yarn.run_command("build"), vec!["yarn", "run", "build"]);
    /// ```
    pub fn run_command(&self, script: &str) -> Vec<String> {
        vec![self.executable().into(), "run".into(), script.into()]
    }

    /// Get the command to run a script with additional arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use npm_scripts::package::PackageManager;
    ///
    /// let args = vec!["--watch".to_string(), "--coverage".to_string()];
    /// let cmd = PackageManager::Npm.run_command_with_args("test", &args);
    /// assert_eq!(cmd, vec!["npm", "run", "test", "--", "--watch", "--coverage"]);
    /// ```
    pub fn run_command_with_args(&self, script: &str, args: &[String]) -> Vec<String> {
        let mut cmd = self.run_command(script);

        if !args.is_empty() {
            // npm and pnpm require -- before args to pass them to the script
            if matches!(self, PackageManager::Npm | PackageManager::Pnpm) {
                cmd.push("--".into());
            }
            cmd.extend(args.iter().cloned());
        }

        cmd
    }

    /// Format the run command as a string for display.
    pub fn format_command(&self, script: &str, args: &[String]) -> String {
        self.run_command_with_args(script, args).join(" ")
    }

    /// Lock file names that identify this package manager.
    pub fn lock_files(&self) -> Vec<&'static str> {
        LOCK_FILES
            .iter()
            .filter(|(_, pm)| pm == self)
            .map(|(file, _)| *file)
            .collect()
    }

    /// Parse an executable name such as `pnpm`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|pm| pm.executable() == name)
    }

    /// Get all supported package managers.
    pub fn all() -> &'static [PackageManager] {
        &[
            PackageManager::Npm,
            PackageManager::Yarn,
            PackageManager::Pnpm,
            PackageManager::Bun,
        ]
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.executable())
    }
}

impl std::str::FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "yarn" => Ok(PackageManager::Yarn),
            "pnpm" => Ok(PackageManager::Pnpm),
            "bun" => Ok(PackageManager::Bun),
            _ => Err(format!(
                "Unknown package manager: '{s}'. Valid options are: npm, yarn, pnpm, bun"
            )),
        }
    }
}

/// Infer the package manager for a directory.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use npm_scripts::package::infer_package_manager;
///
/// let pm = infer_package_manager(Path::new("/path/to/project/src"));
/// println!("Using: {}", pm);
/// ```
pub fn infer_package_manager(start_dir: &Path) -> PackageManager {
    infer_package_manager_reason(start_dir).0
}

/// Infer the package manager and explain why it was chosen.
///
/// The search is bounded by the user's home directory.
pub fn infer_package_manager_reason(start_dir: &Path) -> (PackageManager, String) {
    let boundary = search_boundary();
    infer_package_manager_within(start_dir, boundary.as_deref())
}

/// Infer the package manager, searching upward from `start_dir` and stopping
/// after `boundary` (inclusive) or at the filesystem root.
pub fn infer_package_manager_within(
    start_dir: &Path,
    boundary: Option<&Path>,
) -> (PackageManager, String) {
    let start = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());

    for dir in ancestors_within(&start, boundary) {
        for (file, pm) in LOCK_FILES {
            let lock = dir.join(file);
            if lock.is_file() {
                debug!(lock = %lock.display(), package_manager = %pm, "lock file found");
                return (*pm, format!("found {}", lock.display()));
            }
        }
    }

    (PackageManager::Npm, "default (no lock file found)".to_string())
}

/// Check if a lock file for `pm` exists directly in `dir`.
pub fn has_lock_file(dir: &Path, pm: PackageManager) -> bool {
    pm.lock_files().iter().any(|file| dir.join(file).is_file())
}

/// Describe the manifest's `packageManager` field against the lock files
/// next to it. `None` when the field is absent.
///
/// Inference never reads this field; the note is for debug output.
pub fn describe_declared_package_manager(manifest: &Manifest) -> Option<String> {
    let declared = manifest.package_manager()?;
    let note = match manifest.package_manager_name().and_then(PackageManager::from_name) {
        Some(pm) if has_lock_file(manifest.dir(), pm) => "matching lock file present",
        Some(_) => "no matching lock file next to package.json",
        None => "unsupported package manager",
    };
    Some(format!("{declared} ({note})"))
}
