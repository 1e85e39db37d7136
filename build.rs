//! Build script for nps.
//!
//! Generates man pages using clap_mangen.

use std::env;
use std::fs;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};

/// Minimal CLI struct for man page generation.
///
/// This duplicates the CLI definition to avoid build dependency issues.
#[derive(Parser)]
#[command(name = "nps")]
#[command(
    author,
    version,
    about = "Pick a package.json script from a project or monorepo and run it"
)]
#[command(
    long_about = "nps finds the package.json scripts that matter for where you are, \
    lets you pick one and runs it with the project's package manager.\n\n\
    `nps root` (the default) offers the scripts of ./package.json, `nps workspace` \
    those of the declared workspaces, `nps buffer <FILE>` those of the package.json \
    closest to a file and `nps all` those of every package.json under a directory. \
    The package manager is inferred from lock files unless --runner is given."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Override package manager
    #[arg(short, long, value_name = "RUNNER", value_enum, global = true)]
    runner: Option<Runner>,

    /// Show command without executing
    #[arg(short, long, global = true)]
    dry_run: bool,

    /// Arguments to pass to the selected script
    #[arg(short, long, value_name = "ARGS", allow_hyphen_values = true, global = true)]
    args: Option<String>,

    /// Pick this script instead of prompting
    #[arg(short = 'n', long = "script", value_name = "NAME", global = true)]
    script: Option<String>,

    /// Pick this workspace instead of prompting
    #[arg(short, long, value_name = "NAME", global = true)]
    workspace: Option<String>,

    /// Selection prompt backend
    #[arg(long, value_name = "BACKEND", value_enum, global = true)]
    select: Option<Select>,

    /// Prompt text for the script picker
    #[arg(long, value_name = "TEXT", global = true)]
    prompt: Option<String>,

    /// Item template for the script picker (e.g. "{label} - {command}")
    #[arg(long, value_name = "TEMPLATE", global = true)]
    format: Option<String>,

    /// List workspace scripts in one picker
    #[arg(long, global = true, conflicts_with = "no_solo")]
    solo: bool,

    /// Pick a workspace first, then one of its scripts
    #[arg(long, global = true)]
    no_solo: bool,

    /// How `all` discovers package.json files
    #[arg(long, value_name = "STRATEGY", value_enum, global = true)]
    scan: Option<Scan>,

    /// Path to config file
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, global = true)]
    no_config: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", value_enum)]
    completions: Option<Shell>,
}

#[derive(Subcommand)]
enum Command {
    /// Scripts from package.json in the current directory
    Root,
    /// Scripts from the workspaces of the current directory's package.json
    Workspace,
    /// Scripts from the package.json closest to a file
    Buffer {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Scripts from every package.json under a directory
    All {
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Runner {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

#[derive(Clone, Copy, ValueEnum)]
enum Select {
    Auto,
    Tui,
    Plain,
}

#[derive(Clone, Copy, ValueEnum)]
enum Scan {
    Auto,
    Walk,
    Fd,
}

#[derive(Clone, Copy, ValueEnum)]
enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
    Elvish,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Only generate man pages for release builds or when explicitly requested
    let profile = env::var("PROFILE").unwrap_or_default();
    if profile != "release" && env::var("NPS_GEN_MANPAGE").is_err() {
        return;
    }

    let out_dir = match env::var_os("OUT_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => return,
    };

    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);

    let mut buffer = Vec::new();
    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=failed to generate man page: {e}");
        return;
    }

    let man_path = out_dir.join("nps.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=failed to write man page: {e}");
        return;
    }

    // Also copy to docs directory for distribution
    if let Some(manifest_dir) = env::var_os("CARGO_MANIFEST_DIR") {
        let docs_dir = PathBuf::from(manifest_dir).join("docs");
        if docs_dir.exists() {
            let _ = fs::copy(&man_path, docs_dir.join("nps.1"));
        }
    }
}
