//! Snapshot tests using insta.
//!
//! These tests pin the labels shown in pickers and the dry-run output.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

use npm_scripts::package::{expand_workspaces, read_manifest, scan_manifests, ScanStrategy};
use npm_scripts::select::{flatten, render_template, root_items, workspace_items};

use crate::fixtures::{canonical, create_monorepo, create_project, standard_scripts};

/// Get a Command for the nps binary.
fn nps() -> Command {
    let mut cmd = cargo_bin_cmd!("nps");
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

// ==================== Picker Labels ====================

#[test]
fn test_snapshot_bulk_scan_labels() {
    let repo = create_monorepo();
    let report = scan_manifests(&canonical(&repo), ScanStrategy::Walk);

    let labels: Vec<String> = flatten(&report.manifests)
        .iter()
        .map(|item| item.label().to_string())
        .collect();

    insta::assert_snapshot!(labels.join("\n"), @r"
    monorepo: check
    api: start
    web: build
    web: dev
    ");
}

#[test]
fn test_snapshot_workspace_labels() {
    let repo = create_monorepo();
    let root = read_manifest(&canonical(&repo).join("package.json")).unwrap();

    let labels: Vec<String> = workspace_items(&expand_workspaces(&root).unwrap())
        .iter()
        .map(|item| item.label().to_string())
        .collect();

    insta::assert_snapshot!(labels.join("\n"), @r"
    api  start
    web  build
    web  dev
    ");
}

#[test]
fn test_snapshot_custom_template() {
    let project = create_project(&standard_scripts());
    let manifest = read_manifest(&canonical(&project).join("package.json")).unwrap();

    let rendered: Vec<String> = root_items(&manifest)
        .iter()
        .map(|item| render_template("{scope}/{script} -> {command}", item))
        .collect();

    insta::assert_snapshot!(rendered.join("\n"), @r"
    app/build -> tsc
    app/dev -> vite
    app/lint -> eslint .
    app/test -> vitest
    ");
}

// ==================== Dry Run Output ====================

#[test]
fn test_snapshot_dry_run_per_runner() {
    let project = create_project(&standard_scripts());
    let dir = canonical(&project).display().to_string();

    let lines: Vec<String> = ["npm", "yarn", "pnpm", "bun"]
        .iter()
        .map(|runner| {
            let output = nps()
                .args(["-n", "dev", "--dry-run", "--runner", runner, "--args", "--host 0.0.0.0"])
                .current_dir(project.path())
                .output()
                .expect("Failed to run nps");
            String::from_utf8_lossy(&output.stdout).replace(&dir, "[DIR]")
        })
        .collect();

    insta::assert_snapshot!(lines.concat().trim_end(), @r"
    Would run: cd [DIR] && npm run dev -- --host 0.0.0.0
    Would run: cd [DIR] && yarn run dev --host 0.0.0.0
    Would run: cd [DIR] && pnpm run dev -- --host 0.0.0.0
    Would run: cd [DIR] && bun run dev --host 0.0.0.0
    ");
}
