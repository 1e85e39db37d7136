//! nps - npm Package Scripts
//!
//! Find the `package.json` scripts that matter for where you are, pick one
//! and run it with the project's package manager.
//!
//! # Features
//!
//! - **Four entry points**: the current directory's manifest, the workspaces
//!   it declares, the manifest closest to a file, or every manifest under a
//!   directory
//! - **Package manager inference** from lock files (npm, yarn, pnpm, bun)
//! - **Pluggable prompts**: full-screen fuzzy picker, numbered list, or
//!   selection by name
//! - **Layered configuration**: built-in defaults, config files, then flags
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface argument parsing
//! - [`commands`] - The public operations
//! - [`config`] - Configuration layers and file loading
//! - [`error`] - Error types and exit codes
//! - [`filter`] - Fuzzy filtering for the picker
//! - [`notify`] - User-facing notices
//! - [`package`] - package.json reading, workspaces, discovery and inference
//! - [`runner`] - Script invocation
//! - [`select`] - Script flattening and selection prompts
//! - [`tui`] - Interactive picker
//! - [`utils`] - Path and terminal utilities
//!
//! # Example
//!
//! ```no_run
//! use npm_scripts::commands::{run_root_script, Context, Outcome};
//! use npm_scripts::config::{Options, Settings};
//! use npm_scripts::notify::StderrNotifier;
//!
//! let settings = Settings::new();
//! let notifier = StderrNotifier;
//! let ctx = Context::new(&settings, &notifier, std::env::current_dir().unwrap());
//!
//! if let Outcome::Launched(launch) = run_root_script(&ctx, &Options::default()).unwrap() {
//!     std::process::exit(launch.wait().unwrap());
//! }
//! ```

/// CLI argument definitions.
pub mod cli;

/// Public operations.
pub mod commands;

/// Configuration system for loading and merging settings.
pub mod config;

/// Error types and result helpers.
pub mod error;

/// Fuzzy filtering for choices.
pub mod filter;

/// User-facing notices.
pub mod notify;

/// package.json reading, workspace expansion and package manager inference.
pub mod package;

/// Script invocation.
pub mod runner;

/// Script flattening and selection prompts.
pub mod select;

/// Interactive picker.
pub mod tui;

/// Path and terminal utilities.
pub mod utils;

// Re-export commonly used types
pub use cli::Cli;
pub use commands::{Context, Outcome};
pub use config::{Config, Options, Settings};
pub use error::{NpsError, Result};
pub use package::{Manifest, PackageManager};
pub use runner::RunRequest;
