//! nps - npm Package Scripts
//!
//! Entry point for the nps CLI application.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use npm_scripts::cli::{Cli, Command};
use npm_scripts::commands::{
    default_selector_for, run_buffer_closest_script, run_root_script,
    run_script_from_all_manifests, run_workspace_script, Context, Outcome,
};
use npm_scripts::config::{load_options, Options, Settings};
use npm_scripts::error::{exit_code, NpsError};
use npm_scripts::notify::StderrNotifier;
use npm_scripts::package::{
    describe_declared_package_manager, infer_package_manager_reason, resolve_root,
};
use npm_scripts::select::NamedSelector;
use npm_scripts::utils::{cleanup_terminal, global_config_file, local_config_file};

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            let _ = cleanup_terminal();
            // Check if it's one of our custom errors with good formatting
            if let Some(nps_err) = err.downcast_ref::<NpsError>() {
                eprintln!("Error: {nps_err}");
                return ExitCode::from(nps_err.exit_code() as u8);
            }
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code::GENERAL_ERROR as u8)
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse_args();

    // Handle shell completions early
    if let Some(shell) = cli.completions {
        Cli::generate_completions(shell);
        return Ok(exit_code::SUCCESS);
    }

    init_logging(cli.debug);

    let cwd = std::env::current_dir().context("Failed to read the current directory")?;

    if cli.debug {
        print_debug_header();
        eprintln!("Debug: CLI arguments = {cli:#?}");
        print_debug_paths(&cwd);
    }

    let process_layer = if cli.no_config {
        Options::default()
    } else {
        load_options(cli.config.as_deref(), &cwd)?
    };
    let settings = Settings::with_layer(process_layer);
    let per_call = cli.per_call_options();

    if cli.debug {
        let config = settings.resolve(&per_call);
        eprintln!("Debug: Resolved config = {config:#?}");
        match config.package_manager {
            Some(pm) => eprintln!("Debug: Package manager = {pm} (configured)"),
            None => {
                let (pm, reason) = infer_package_manager_reason(&cwd);
                eprintln!("Debug: Package manager = {pm} ({reason})");
            }
        }
        if let Ok(Some(root)) = resolve_root(&cwd) {
            if let Some(declared) = describe_declared_package_manager(&root) {
                eprintln!("Debug: packageManager field = {declared}");
            }
        }
        eprintln!();
    }

    let notifier = StderrNotifier;
    let named;
    let mut ctx = Context::new(&settings, &notifier, cwd).with_args(cli.script_args());
    if cli.has_names() {
        let backend = settings.resolve(&per_call).select;
        named = NamedSelector::new(cli.script.clone(), cli.workspace.clone())
            .with_fallback(default_selector_for(backend));
        ctx = ctx.with_selector(&named);
    }

    let command = cli.subcommand();
    debug!(?command, "running");

    let outcome = match &command {
        Command::Root => run_root_script(&ctx, &per_call),
        Command::Workspace => run_workspace_script(&ctx, &per_call),
        Command::Buffer { file } => run_buffer_closest_script(&ctx, &per_call, file),
        Command::All { dir } => run_script_from_all_manifests(&ctx, &per_call, dir.as_deref()),
    }
    .context("Selection failed")?;

    match outcome {
        Outcome::Launched(launch) => launch.wait().context("Failed to wait for the script"),
        Outcome::Cancelled => Ok(exit_code::SUCCESS),
        Outcome::Reported { exit_code } => Ok(exit_code),
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--debug`.
fn init_logging(debug: bool) {
    let default = if debug { "npm_scripts=debug" } else { "npm_scripts=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

// ==================== Debug Functions ====================

/// Print debug header with version info.
fn print_debug_header() {
    eprintln!("=== nps debug mode ===");
    eprintln!("Version: {}", env!("CARGO_PKG_VERSION"));
    eprintln!();
}

/// Print debug information about file paths.
fn print_debug_paths(cwd: &Path) {
    eprintln!("Debug: File locations:");

    match global_config_file() {
        Some(cfg) => eprintln!("  User config: {} (exists: {})", cfg.display(), cfg.exists()),
        None => eprintln!("  User config: <not available>"),
    }

    let local = local_config_file(cwd);
    eprintln!("  Project config: {} (exists: {})", local.display(), local.exists());

    let package_json = cwd.join("package.json");
    eprintln!(
        "  package.json: {} (exists: {})",
        package_json.display(),
        package_json.exists()
    );

    eprintln!();
}
