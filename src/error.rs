//! Error types for nps.
//!
//! Uses thiserror for ergonomic error definitions. Every variant here is an
//! expected, user-facing condition: the public operations turn them into a
//! notification and an exit code instead of propagating them.

use std::path::PathBuf;

use thiserror::Error;

/// Exit codes for nps.
pub mod exit_code {
    /// Success.
    pub const SUCCESS: i32 = 0;
    /// General error.
    pub const GENERAL_ERROR: i32 = 1;
    /// No package.json found.
    pub const NO_PACKAGE_JSON: i32 = 2;
    /// No scripts defined.
    pub const NO_SCRIPTS: i32 = 3;
    /// Script could not be started.
    pub const SPAWN_FAILED: i32 = 4;
    /// Invalid configuration.
    pub const INVALID_CONFIG: i32 = 5;
    /// No workspaces declared or found.
    pub const NO_WORKSPACES: i32 = 6;
    /// Interrupted (Ctrl+C).
    pub const INTERRUPTED: i32 = 130;
}

/// Main error type for nps.
#[derive(Error, Debug)]
pub enum NpsError {
    /// No package.json where one was expected.
    #[error("No package.json found in {path}")]
    NotFound { path: PathBuf },

    /// The manifest exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    NotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid JSON.
    #[error("Failed to parse {path}:\n  {message}")]
    ParseError { path: PathBuf, message: String },

    /// The manifest declares no runnable scripts.
    #[error("No scripts defined in {path}\n\nTip: Add scripts to your package.json:\n  {{\n    \"scripts\": {{\n      \"build\": \"your-build-command\"\n    }}\n  }}")]
    EmptyScripts { path: PathBuf },

    /// The root manifest has no `workspaces` field.
    #[error("No workspaces declared in {path}\n\nTip: Declare workspace globs in package.json:\n  \"workspaces\": [\"packages/*\"]")]
    NoWorkspacesDeclared { path: PathBuf },

    /// Workspaces are declared but none of them has a readable package.json.
    #[error("No workspace packages matched the patterns in {path}")]
    EmptyWorkspaces { path: PathBuf },

    /// Workspaces were found but none of them defines a script.
    #[error("None of the workspaces declared in {path} define scripts")]
    WorkspacesWithoutScripts { path: PathBuf },

    /// A bulk scan found nothing to offer.
    #[error("No package.json with scripts found under {path}")]
    NoManifestsFound { path: PathBuf },

    /// Invalid configuration file.
    #[error("Invalid config at {path}:\n  {message}\n\nTip: Check the config file syntax and ensure all values are valid.")]
    InvalidConfig { path: PathBuf, message: String },

    /// The package manager could not be started.
    #[error("Failed to run '{command}' in {dir}: {source}")]
    Spawn {
        command: String,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl NpsError {
    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            NpsError::NotFound { .. } => exit_code::NO_PACKAGE_JSON,
            NpsError::NotReadable { .. } => exit_code::NO_PACKAGE_JSON,
            NpsError::ParseError { .. } => exit_code::NO_PACKAGE_JSON,
            NpsError::EmptyScripts { .. } => exit_code::NO_SCRIPTS,
            NpsError::NoWorkspacesDeclared { .. } => exit_code::NO_WORKSPACES,
            NpsError::EmptyWorkspaces { .. } => exit_code::NO_WORKSPACES,
            NpsError::WorkspacesWithoutScripts { .. } => exit_code::NO_SCRIPTS,
            NpsError::NoManifestsFound { .. } => exit_code::NO_SCRIPTS,
            NpsError::InvalidConfig { .. } => exit_code::INVALID_CONFIG,
            NpsError::Spawn { .. } => exit_code::SPAWN_FAILED,
            NpsError::Io(_) => exit_code::GENERAL_ERROR,
        }
    }

    /// Whether this is an ordinary "nothing to do here" outcome rather than a
    /// failure. Informational conditions are reported as notices, not warnings.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            NpsError::NotFound { .. }
                | NpsError::EmptyScripts { .. }
                | NpsError::NoWorkspacesDeclared { .. }
                | NpsError::EmptyWorkspaces { .. }
                | NpsError::WorkspacesWithoutScripts { .. }
                | NpsError::NoManifestsFound { .. }
        )
    }

    /// Build a parse error with line/column context from a serde_json error.
    pub fn parse(path: impl Into<PathBuf>, content: &str, error: &serde_json::Error) -> Self {
        NpsError::ParseError {
            path: path.into(),
            message: format_json_error(content, error),
        }
    }
}

/// Format a JSON parsing error with context.
fn format_json_error(content: &str, error: &serde_json::Error) -> String {
    let line = error.line();
    let column = error.column();

    // Try to show the problematic line
    if let Some(error_line) = content.lines().nth(line.saturating_sub(1)) {
        let pointer = " ".repeat(column.saturating_sub(1)) + "^";
        format!(
            "{}\n  at line {}, column {}:\n    {}\n    {}",
            error, line, column, error_line, pointer
        )
    } else {
        format!("{} at line {}, column {}", error, line, column)
    }
}

/// Result type alias for nps operations.
pub type Result<T> = std::result::Result<T, NpsError>;
