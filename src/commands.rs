//! Public operations.
//!
//! Each operation resolves its configuration, finds manifests, asks the
//! selector for a script and hands the resulting [`RunRequest`] to a
//! [`ScriptRunner`]. Expected failures (no manifest, no scripts, no
//! workspaces, broken JSON) are reported through the [`Notifier`] and end
//! the operation with [`Outcome::Reported`]; they are never returned as
//! errors. Only a failing selector produces an `Err`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::config::{Config, Options, RunScript, SelectBackend, Settings};
use crate::error::NpsError;
use crate::notify::Notifier;
use crate::package::{
    expand_workspaces, infer_package_manager_within, resolve_from_within, resolve_root,
    scan_manifests, Manifest, ScanReport, WorkspaceEntry,
};
use crate::runner::{DryRunRunner, Launch, ProcessRunner, RunRequest, ScriptRunner};
use crate::select::{
    flatten, root_items, select, workspace_items, workspace_script_items, PlainSelector,
    ScriptItem, SelectOptions, Selector,
};
use crate::tui::{Theme, TuiSelector};
use crate::utils::{is_interactive, search_boundary};

/// How an operation ended.
#[derive(Debug)]
pub enum Outcome {
    /// A script was handed to the runner.
    Launched(Launch),
    /// The user dismissed the prompt.
    Cancelled,
    /// Nothing was run; a notice explains why.
    Reported {
        /// Exit code for the process.
        exit_code: i32,
    },
}

impl Outcome {
    /// Build a report from an expected failure, notifying the user.
    fn report(notifier: &dyn Notifier, error: NpsError) -> Self {
        let message = error.to_string();
        if error.is_informational() {
            notifier.info(&message);
        } else {
            notifier.warn(&message);
        }
        Outcome::Reported {
            exit_code: error.exit_code(),
        }
    }
}

/// Everything an operation needs from its host.
pub struct Context<'a> {
    /// Configuration layers.
    pub settings: &'a Settings,
    /// Receives user-facing notices.
    pub notifier: &'a dyn Notifier,
    /// Selector override. `None` picks one from the `select` key.
    pub selector: Option<&'a dyn Selector>,
    /// Runner override. `None` picks one from the `run_script` key.
    pub runner: Option<&'a dyn ScriptRunner>,
    /// Directory the operation runs from.
    pub cwd: PathBuf,
    /// Extra arguments forwarded to the script.
    pub args: Vec<String>,
    /// Upper bound for upward searches.
    pub boundary: Option<PathBuf>,
}

impl<'a> Context<'a> {
    /// A context with default collaborators, bounded by the home directory.
    pub fn new(settings: &'a Settings, notifier: &'a dyn Notifier, cwd: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            notifier,
            selector: None,
            runner: None,
            cwd: cwd.into(),
            args: Vec::new(),
            boundary: search_boundary(),
        }
    }

    /// Use `selector` for every prompt.
    pub fn with_selector(mut self, selector: &'a dyn Selector) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Use `runner` for every request.
    pub fn with_runner(mut self, runner: &'a dyn ScriptRunner) -> Self {
        self.runner = Some(runner);
        self
    }

    /// Forward `args` to the chosen script.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Bound upward searches by `boundary` instead of the home directory.
    pub fn with_boundary(mut self, boundary: Option<PathBuf>) -> Self {
        self.boundary = boundary;
        self
    }

    /// Pick a script from `items` and launch it.
    fn pick_and_launch(&self, config: &Config, items: &[ScriptItem]) -> Result<Outcome> {
        let default_selector;
        let selector: &dyn Selector = match self.selector {
            Some(selector) => selector,
            None => {
                default_selector = default_selector_for(config.select);
                default_selector.as_ref()
            }
        };

        let chosen = select(selector, items, &SelectOptions::scripts(config), |item| {
            item.cloned()
        })?;

        Ok(match chosen {
            Some(item) => self.launch(config, &item),
            None => Outcome::Cancelled,
        })
    }

    /// Build the run request for `item` and hand it to the runner.
    fn launch(&self, config: &Config, item: &ScriptItem) -> Outcome {
        let package_manager = match config.package_manager {
            Some(pm) => pm,
            None => {
                let (pm, reason) =
                    infer_package_manager_within(item.dir(), self.boundary.as_deref());
                debug!(package_manager = %pm, %reason, "package manager inferred");
                pm
            }
        };

        let request = RunRequest::new(item.script(), item.dir(), package_manager)
            .with_args(self.args.clone());
        debug!(request = %request, "launching");

        let default_runner;
        let runner: &dyn ScriptRunner = match self.runner {
            Some(runner) => runner,
            None => {
                default_runner = default_runner_for(config.run_script);
                default_runner.as_ref()
            }
        };

        match runner.run(&request) {
            Ok(launch) => Outcome::Launched(launch),
            Err(e) => Outcome::report(self.notifier, e),
        }
    }

    /// Resolve `path` against the working directory.
    fn absolute(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }
}

/// The selector a `select` backend stands for.
pub fn default_selector_for(backend: SelectBackend) -> Box<dyn Selector> {
    let tui = matches!(backend, SelectBackend::Tui)
        || (backend == SelectBackend::Auto && is_interactive());
    if tui {
        Box::new(TuiSelector::new(Theme::detect()))
    } else {
        Box::new(PlainSelector::stdio())
    }
}

/// The runner a `run_script` value stands for.
pub fn default_runner_for(run_script: RunScript) -> Box<dyn ScriptRunner> {
    match run_script {
        RunScript::Spawn => Box::new(ProcessRunner),
        RunScript::Print => Box::new(DryRunRunner::stdout()),
    }
}

/// Pick and run a script from `package.json` in the working directory.
///
/// # Errors
///
/// Returns an error only if the selector fails.
pub fn run_root_script(ctx: &Context<'_>, per_call: &Options) -> Result<Outcome> {
    let config = ctx.settings.resolve(per_call);

    let manifest = match load_root(ctx) {
        Ok(manifest) => manifest,
        Err(e) => return Ok(Outcome::report(ctx.notifier, e)),
    };
    if !manifest.has_scripts() {
        return Ok(Outcome::report(ctx.notifier, empty_scripts(&manifest)));
    }

    ctx.pick_and_launch(&config, &root_items(&manifest))
}

/// Pick and run a script from one of the root manifest's workspaces.
///
/// With `workspace_script_solo_picker` every workspace script is offered in
/// one list; otherwise a workspace is picked first, then one of its scripts.
///
/// # Errors
///
/// Returns an error only if the selector fails.
pub fn run_workspace_script(ctx: &Context<'_>, per_call: &Options) -> Result<Outcome> {
    let config = ctx.settings.resolve(per_call);

    let root = match load_root(ctx) {
        Ok(root) => root,
        Err(e) => return Ok(Outcome::report(ctx.notifier, e)),
    };
    let workspaces = match expand_workspaces(&root) {
        Ok(workspaces) => workspaces,
        Err(e) => return Ok(Outcome::report(ctx.notifier, e)),
    };
    if workspaces.is_empty() {
        let error = NpsError::EmptyWorkspaces {
            path: root.path().to_path_buf(),
        };
        return Ok(Outcome::report(ctx.notifier, error));
    }
    debug!(count = workspaces.len(), solo = config.workspace_script_solo_picker, "workspaces expanded");

    if config.workspace_script_solo_picker {
        let items = workspace_items(&workspaces);
        if items.is_empty() {
            let error = NpsError::WorkspacesWithoutScripts {
                path: root.path().to_path_buf(),
            };
            return Ok(Outcome::report(ctx.notifier, error));
        }
        return ctx.pick_and_launch(&config, &items);
    }

    let entries: Vec<WorkspaceEntry> = workspaces.into_values().collect();
    let default_selector;
    let selector: &dyn Selector = match ctx.selector {
        Some(selector) => selector,
        None => {
            default_selector = default_selector_for(config.select);
            default_selector.as_ref()
        }
    };
    let chosen = select(selector, &entries, &SelectOptions::workspaces(&config), |entry| {
        entry.cloned()
    })?;

    let Some(entry) = chosen else {
        return Ok(Outcome::Cancelled);
    };
    let items = workspace_script_items(&entry);
    if items.is_empty() {
        return Ok(Outcome::report(ctx.notifier, empty_scripts(entry.manifest())));
    }

    // Reuse the picker that was just shown for the second step
    let step_ctx = Context {
        selector: Some(selector),
        settings: ctx.settings,
        notifier: ctx.notifier,
        runner: ctx.runner,
        cwd: ctx.cwd.clone(),
        args: ctx.args.clone(),
        boundary: ctx.boundary.clone(),
    };
    step_ctx.pick_and_launch(&config, &items)
}

/// Pick and run a script from the manifest closest to `file`.
///
/// `file` may be a file or a directory, relative to the working directory.
///
/// # Errors
///
/// Returns an error only if the selector fails.
pub fn run_buffer_closest_script(
    ctx: &Context<'_>,
    per_call: &Options,
    file: &Path,
) -> Result<Outcome> {
    let config = ctx.settings.resolve(per_call);
    let file = ctx.absolute(file);

    let manifest = match resolve_from_within(&file, ctx.boundary.as_deref()) {
        Ok(Some(manifest)) => manifest,
        Ok(None) => {
            let error = NpsError::NotFound { path: file };
            return Ok(Outcome::report(ctx.notifier, error));
        }
        Err(e) => return Ok(Outcome::report(ctx.notifier, e)),
    };
    if !manifest.has_scripts() {
        return Ok(Outcome::report(ctx.notifier, empty_scripts(&manifest)));
    }

    ctx.pick_and_launch(&config, &root_items(&manifest))
}

/// Pick and run a script from every `package.json` under `root_dir`.
///
/// `root_dir` defaults to the working directory. Manifests that fail to
/// parse are listed in one warning; the rest are still offered.
///
/// # Errors
///
/// Returns an error only if the selector fails.
pub fn run_script_from_all_manifests(
    ctx: &Context<'_>,
    per_call: &Options,
    root_dir: Option<&Path>,
) -> Result<Outcome> {
    let config = ctx.settings.resolve(per_call);
    let root_dir = root_dir.map_or_else(|| ctx.cwd.clone(), |dir| ctx.absolute(dir));

    let report = scan_manifests(&root_dir, config.scan_strategy);
    if report.has_failures() {
        ctx.notifier.warn(&failure_summary(&report));
    }

    let items = flatten(&report.manifests);
    if items.is_empty() {
        let error = NpsError::NoManifestsFound { path: root_dir };
        return Ok(Outcome::report(ctx.notifier, error));
    }

    ctx.pick_and_launch(&config, &items)
}

/// One message naming every manifest that failed to parse.
pub fn failure_summary(report: &ScanReport) -> String {
    let mut message = format!(
        "{} of {} package.json files could not be read:",
        report.failures.len(),
        report.discovered()
    );
    for failure in &report.failures {
        message.push_str(&format!("\n  {}: {}", failure.path.display(), failure.reason));
    }
    message
}

fn load_root(ctx: &Context<'_>) -> crate::error::Result<Manifest> {
    resolve_root(&ctx.cwd)?.ok_or_else(|| NpsError::NotFound {
        path: ctx.cwd.clone(),
    })
}

fn empty_scripts(manifest: &Manifest) -> NpsError {
    NpsError::EmptyScripts {
        path: manifest.path().to_path_buf(),
    }
}
