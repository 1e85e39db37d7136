//! Run requests.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::package::PackageManager;

/// A resolved script invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Script name from the manifest.
    pub script_name: String,
    /// Directory the package manager runs in.
    pub working_directory: PathBuf,
    /// Package manager to invoke.
    pub package_manager: PackageManager,
    /// Extra arguments forwarded to the script.
    pub args: Vec<String>,
}

impl RunRequest {
    /// Create a request without extra arguments.
    pub fn new(
        script_name: impl Into<String>,
        working_directory: impl Into<PathBuf>,
        package_manager: PackageManager,
    ) -> Self {
        Self {
            script_name: script_name.into(),
            working_directory: working_directory.into(),
            package_manager,
            args: Vec::new(),
        }
    }

    /// Forward `args` to the script.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Get the working directory.
    pub fn dir(&self) -> &Path {
        &self.working_directory
    }

    /// Program and arguments to execute.
    pub fn command_parts(&self) -> Vec<String> {
        self.package_manager
            .run_command_with_args(&self.script_name, &self.args)
    }

    /// The command as a display string.
    ///
    /// # Examples
    ///
    /// ```
    /// use npm_scripts::package::PackageManager;
    /// use npm_scripts::runner::RunRequest;
    ///
    /// let request = RunRequest::new("build", ".", PackageManager::Pnpm);
    /// assert_eq!(request.command(), "pnpm run build");
    ///
    /// let request = request.with_args(vec!["--watch".to_string()]);
    /// assert_eq!(request.command(), "pnpm run build -- --watch");
    /// ```
    pub fn command(&self) -> String {
        self.command_parts().join(" ")
    }
}

impl fmt::Display for RunRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cd {} && {}",
            self.working_directory.display(),
            self.command()
        )
    }
}

/// Split a user-supplied argument string the way a shell would.
///
/// Falls back to a single argument when the quoting is unbalanced.
///
/// # Examples
///
/// ```
/// use npm_scripts::runner::parse_args;
///
/// assert_eq!(parse_args("--port 3000 --host 'my host'"), vec!["--port", "3000", "--host", "my host"]);
/// assert!(parse_args("").is_empty());
/// ```
pub fn parse_args(args: &str) -> Vec<String> {
    shell_words::split(args).unwrap_or_else(|_| vec![args.to_string()])
}
