//! End-to-end tests of the public operations through the library API.
//!
//! Picks are made by name and runs are printed, so nothing is spawned.

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;

use npm_scripts::commands::{
    run_buffer_closest_script, run_root_script, run_script_from_all_manifests,
    run_workspace_script, Context, Outcome,
};
use npm_scripts::config::{Options, Settings};
use npm_scripts::notify::{Level, RecordingNotifier};
use npm_scripts::package::{PackageManager, ScanStrategy};
use npm_scripts::runner::DryRunRunner;
use npm_scripts::select::NamedSelector;
use tempfile::TempDir;

use crate::fixtures::{canonical, create_monorepo, create_project, standard_scripts, write_file};

/// Output sink shared with the runner.
#[derive(Clone, Default)]
struct Shared(Rc<RefCell<Vec<u8>>>);

impl Shared {
    fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for Shared {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct Harness {
    temp: TempDir,
    settings: Settings,
    notifier: RecordingNotifier,
    output: Shared,
    runner: DryRunRunner,
}

impl Harness {
    fn new(temp: TempDir) -> Self {
        let output = Shared::default();
        Self {
            temp,
            settings: Settings::new(),
            notifier: RecordingNotifier::new(),
            runner: DryRunRunner::new(output.clone()),
            output,
        }
    }

    fn ctx<'a>(&'a self, selector: &'a NamedSelector) -> Context<'a> {
        let root = canonical(&self.temp);
        Context::new(&self.settings, &self.notifier, root.clone())
            .with_selector(selector)
            .with_runner(&self.runner)
            .with_boundary(Some(root))
    }

    fn dir(&self, rel: &str) -> String {
        let root = canonical(&self.temp);
        let dir = if rel.is_empty() { root } else { root.join(rel) };
        dir.display().to_string()
    }
}

fn pick(script: &str) -> NamedSelector {
    NamedSelector::new(Some(script.to_string()), None)
}

fn exit_code(outcome: Outcome) -> i32 {
    match outcome {
        Outcome::Launched(launch) => launch.wait().unwrap(),
        Outcome::Cancelled => 0,
        Outcome::Reported { exit_code } => exit_code,
    }
}

// ==================== Root ====================

#[test]
fn test_root_script_runs_in_cwd() {
    let h = Harness::new(create_project(&standard_scripts()));

    let outcome = run_root_script(&h.ctx(&pick("build")), &Options::default()).unwrap();

    assert_eq!(exit_code(outcome), 0);
    assert_eq!(
        h.output.text(),
        format!("Would run: cd {} && npm run build\n", h.dir(""))
    );
    assert!(h.notifier.messages().is_empty());
}

#[test]
fn test_per_call_package_manager_and_args() {
    let h = Harness::new(create_project(&standard_scripts()));
    let per_call = Options {
        package_manager: Some(PackageManager::Yarn),
        ..Options::default()
    };
    let selector = pick("test");
    let ctx = h.ctx(&selector).with_args(vec!["--coverage".to_string()]);

    run_root_script(&ctx, &per_call).unwrap();

    assert!(h.output.text().ends_with("yarn run test --coverage\n"));
}

// ==================== Workspaces ====================

#[test]
fn test_workspace_solo_and_two_step_agree() {
    let h = Harness::new(create_monorepo());

    let solo = NamedSelector::new(Some("dev".to_string()), Some("web".to_string()));
    run_workspace_script(&h.ctx(&solo), &Options::default()).unwrap();

    let two_step = Options {
        workspace_script_solo_picker: Some(false),
        ..Options::default()
    };
    run_workspace_script(&h.ctx(&solo), &two_step).unwrap();

    let expected = format!("Would run: cd {} && npm run dev\n", h.dir("packages/web"));
    assert_eq!(h.output.text(), expected.repeat(2));
}

#[test]
fn test_workspace_cancel_at_script_step() {
    let h = Harness::new(create_monorepo());
    let selector = NamedSelector::new(None, Some("api".to_string()));
    let two_step = Options {
        workspace_script_solo_picker: Some(false),
        ..Options::default()
    };

    let outcome = run_workspace_script(&h.ctx(&selector), &two_step).unwrap();

    assert!(matches!(outcome, Outcome::Cancelled));
    assert!(h.output.text().is_empty());
}

#[test]
fn test_excluded_workspace_is_not_offered() {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "package.json",
        r#"{"workspaces": ["packages/*", "!packages/legacy"]}"#,
    );
    write_file(temp.path(), "packages/app/package.json", r#"{"name": "app", "scripts": {"dev": "next"}}"#);
    write_file(temp.path(), "packages/legacy/package.json", r#"{"name": "legacy", "scripts": {"dev": "grunt"}}"#);
    let h = Harness::new(temp);

    let selector = NamedSelector::new(Some("dev".to_string()), Some("legacy".to_string()));
    let outcome = run_workspace_script(&h.ctx(&selector), &Options::default()).unwrap();

    assert!(matches!(outcome, Outcome::Cancelled));
    assert!(h.output.text().is_empty());
}

// ==================== Buffer ====================

#[test]
fn test_buffer_from_directory_and_file() {
    let h = Harness::new(create_monorepo());
    write_file(h.temp.path(), "packages/api/src/routes/index.js", "");

    let selector = pick("start");
    run_buffer_closest_script(&h.ctx(&selector), &Options::default(), Path::new("packages/api/src/routes/index.js")).unwrap();
    run_buffer_closest_script(&h.ctx(&selector), &Options::default(), Path::new("packages/api")).unwrap();

    let expected = format!("Would run: cd {} && npm run start\n", h.dir("packages/api"));
    assert_eq!(h.output.text(), expected.repeat(2));
}

#[test]
fn test_buffer_falls_back_to_root_manifest() {
    let h = Harness::new(create_monorepo());
    write_file(h.temp.path(), "scripts/release.sh", "#!/bin/sh\n");

    run_buffer_closest_script(&h.ctx(&pick("check")), &Options::default(), Path::new("scripts/release.sh")).unwrap();

    assert!(h.output.text().starts_with(&format!("Would run: cd {} ", h.dir(""))));
}

// ==================== Bulk Scan ====================

#[test]
fn test_bulk_scan_skips_node_modules_and_reports_failures() {
    let h = Harness::new(create_monorepo());
    write_file(h.temp.path(), "node_modules/dep/package.json", r#"{"name": "dep", "scripts": {"postinstall": "x"}}"#);
    write_file(h.temp.path(), "tools/broken/package.json", r#"{"scripts": "#);
    let per_call = Options {
        scan_strategy: Some(ScanStrategy::Walk),
        ..Options::default()
    };

    let missing = run_script_from_all_manifests(&h.ctx(&pick("dep: postinstall")), &per_call, None).unwrap();
    assert!(matches!(missing, Outcome::Cancelled));

    let found = run_script_from_all_manifests(&h.ctx(&pick("web: build")), &per_call, None).unwrap();
    assert_eq!(exit_code(found), 0);
    assert!(h.output.text().ends_with("npm run build\n"));

    let warnings = h.notifier.at(Level::Warn);
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].starts_with("1 of 5 package.json files could not be read:"));
    assert!(warnings[0].contains("broken"));
}

#[test]
fn test_bulk_scan_of_subdirectory() {
    let h = Harness::new(create_monorepo());
    let per_call = Options {
        scan_strategy: Some(ScanStrategy::Walk),
        ..Options::default()
    };

    // The root manifest is outside the scanned directory
    let outcome = run_script_from_all_manifests(
        &h.ctx(&pick("monorepo: check")),
        &per_call,
        Some(Path::new("packages")),
    )
    .unwrap();

    assert!(matches!(outcome, Outcome::Cancelled));
    assert!(h.output.text().is_empty());
}
