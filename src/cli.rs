//! CLI argument definitions for nps.
//!
//! Uses clap with derive macros for argument parsing. Flags that map onto
//! configuration keys build the per-call layer; everything else is handled
//! by the binary.
//!
//! # Example
//!
//! ```no_run
//! use npm_scripts::cli::Cli;
//!
//! let cli = Cli::parse_args();
//! println!("Command: {:?}", cli.subcommand());
//! ```

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};

use crate::config::{Options, RunScript, SelectBackend};
use crate::package::{PackageManager, ScanStrategy};
use crate::runner::parse_args;

/// Pick a package.json script from a project or monorepo and run it.
#[derive(Parser, Debug)]
#[command(name = "nps")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Where to look for scripts (default: root)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Override package manager
    #[arg(short, long, value_name = "RUNNER", value_enum, global = true)]
    pub runner: Option<CliRunner>,

    /// Show command without executing
    #[arg(short, long, global = true)]
    pub dry_run: bool,

    /// Arguments to pass to the selected script
    #[arg(short, long, value_name = "ARGS", allow_hyphen_values = true, global = true)]
    pub args: Option<String>,

    /// Pick this script instead of prompting
    #[arg(short = 'n', long = "script", value_name = "NAME", global = true)]
    pub script: Option<String>,

    /// Pick this workspace instead of prompting
    #[arg(short, long, value_name = "NAME", global = true)]
    pub workspace: Option<String>,

    /// Selection prompt backend
    #[arg(long, value_name = "BACKEND", value_enum, global = true)]
    pub select: Option<CliSelect>,

    /// Prompt text for the script picker
    #[arg(long, value_name = "TEXT", global = true)]
    pub prompt: Option<String>,

    /// Item template for the script picker (e.g. "{label} - {command}")
    #[arg(long, value_name = "TEMPLATE", global = true)]
    pub format: Option<String>,

    /// List workspace scripts in one picker
    #[arg(long, global = true, conflicts_with = "no_solo")]
    pub solo: bool,

    /// Pick a workspace first, then one of its scripts
    #[arg(long, global = true)]
    pub no_solo: bool,

    /// How `all` discovers package.json files
    #[arg(long, value_name = "STRATEGY", value_enum, global = true)]
    pub scan: Option<CliScan>,

    /// Path to config file
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<CliShell>,
}

/// Where to look for scripts.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Scripts from package.json in the current directory
    Root,
    /// Scripts from the workspaces of the current directory's package.json
    Workspace,
    /// Scripts from the package.json closest to a file
    Buffer {
        /// File or directory to start from
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Scripts from every package.json under a directory
    All {
        /// Directory to scan (default: current directory)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliShell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    Powershell,
    /// Elvish shell
    Elvish,
}

/// Package manager for CLI parsing.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliRunner {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl From<CliRunner> for PackageManager {
    fn from(runner: CliRunner) -> Self {
        match runner {
            CliRunner::Npm => PackageManager::Npm,
            CliRunner::Yarn => PackageManager::Yarn,
            CliRunner::Pnpm => PackageManager::Pnpm,
            CliRunner::Bun => PackageManager::Bun,
        }
    }
}

/// Selection backend for CLI parsing.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliSelect {
    /// TUI on a terminal, numbered list otherwise.
    Auto,
    /// Full-screen picker.
    Tui,
    /// Numbered list on stdin/stdout.
    Plain,
}

impl From<CliSelect> for SelectBackend {
    fn from(select: CliSelect) -> Self {
        match select {
            CliSelect::Auto => SelectBackend::Auto,
            CliSelect::Tui => SelectBackend::Tui,
            CliSelect::Plain => SelectBackend::Plain,
        }
    }
}

/// Scan strategy for CLI parsing.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliScan {
    /// `fd` when installed, otherwise walk.
    Auto,
    /// Recursive directory walk.
    Walk,
    /// The `fd` finder.
    Fd,
}

impl From<CliScan> for ScanStrategy {
    fn from(scan: CliScan) -> Self {
        match scan {
            CliScan::Auto => ScanStrategy::Auto,
            CliScan::Walk => ScanStrategy::Walk,
            CliScan::Fd => ScanStrategy::Fd,
        }
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The subcommand, defaulting to `root`.
    pub fn subcommand(&self) -> Command {
        self.command.clone().unwrap_or(Command::Root)
    }

    /// Whether a name was given for non-interactive selection.
    pub fn has_names(&self) -> bool {
        self.script.is_some() || self.workspace.is_some()
    }

    /// Arguments forwarded to the script, split like a shell would.
    pub fn script_args(&self) -> Vec<String> {
        self.args.as_deref().map(parse_args).unwrap_or_default()
    }

    /// The per-call configuration layer built from flags.
    pub fn per_call_options(&self) -> Options {
        let solo = match (self.solo, self.no_solo) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        Options {
            select: self.select.map(Into::into),
            select_script_prompt: self.prompt.clone(),
            select_script_format_item: self.format.clone(),
            package_manager: self.runner.map(Into::into),
            workspace_script_solo_picker: solo,
            run_script: self.dry_run.then_some(RunScript::Print),
            scan_strategy: self.scan.map(Into::into),
            ..Options::default()
        }
    }

    /// Generate shell completions and write to stdout.
    pub fn generate_completions(shell: CliShell) {
        let mut cmd = Cli::command();
        let shell = match shell {
            CliShell::Bash => Shell::Bash,
            CliShell::Zsh => Shell::Zsh,
            CliShell::Fish => Shell::Fish,
            CliShell::Powershell => Shell::PowerShell,
            CliShell::Elvish => Shell::Elvish,
        };
        generate(shell, &mut cmd, "nps", &mut std::io::stdout());
    }
}
