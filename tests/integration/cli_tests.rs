//! CLI integration tests for nps.
//!
//! These tests verify the command-line interface behavior using assert_cmd.
//! Scripts are never actually spawned: every run uses `--dry-run` or ends
//! before launching.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

use crate::fixtures::{
    canonical, create_empty_project, create_monorepo, create_project,
    create_project_invalid_json, create_project_no_scripts, create_project_with_config,
    create_project_with_lockfile, standard_scripts, write_file, LockfileType,
};

/// Get a Command for the nps binary.
fn nps() -> Command {
    let mut cmd = cargo_bin_cmd!("nps");
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

// ==================== Help and Version ====================

#[test]
fn test_help_output() {
    nps()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Pick a package.json script from a project or monorepo and run it",
        ))
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("workspace"))
        .stdout(predicate::str::contains("buffer"))
        .stdout(predicate::str::contains("--script"))
        .stdout(predicate::str::contains("--runner"));
}

#[test]
fn test_version_output() {
    nps()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nps"))
        .stdout(predicate::str::is_match(r"\d+\.\d+\.\d+").unwrap());
}

#[test]
fn test_completions() {
    nps()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nps"));
}

// ==================== Root Scripts ====================

#[test]
fn test_root_script_by_name() {
    let project = create_project(&standard_scripts());
    let dir = canonical(&project);

    nps()
        .args(["--script", "build", "--dry-run"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(format!("Would run: cd {} && npm run build\n", dir.display()));
}

#[test]
fn test_root_is_the_default_subcommand() {
    let project = create_project(&standard_scripts());

    let implicit = nps()
        .args(["-n", "dev", "-d"])
        .current_dir(project.path())
        .output()
        .unwrap();
    let explicit = nps()
        .args(["root", "-n", "dev", "-d"])
        .current_dir(project.path())
        .output()
        .unwrap();

    assert!(implicit.status.success());
    assert_eq!(implicit.stdout, explicit.stdout);
}

#[test]
fn test_runner_and_args() {
    let project = create_project(&standard_scripts());

    nps()
        .args(["--script", "test", "--runner", "pnpm", "--args", "--watch --reporter dot", "--dry-run"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "pnpm run test -- --watch --reporter dot\n",
        ));
}

#[test]
fn test_lockfile_decides_package_manager() {
    let project = create_project_with_lockfile(&standard_scripts(), LockfileType::Yarn);

    nps()
        .args(["--script", "lint", "--dry-run"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::ends_with("yarn run lint\n"));
}

#[test]
fn test_plain_prompt_reads_number() {
    let project = create_project(&standard_scripts());

    nps()
        .args(["--select", "plain", "--dry-run"])
        .current_dir(project.path())
        .write_stdin("2\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Select a script:"))
        .stderr(predicate::str::contains("1) build"))
        .stdout(predicate::str::ends_with("npm run dev\n"));
}

#[test]
fn test_plain_prompt_end_of_input_cancels() {
    let project = create_project(&standard_scripts());

    nps()
        .args(["--select", "plain"])
        .current_dir(project.path())
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_unknown_script_name_runs_nothing() {
    let project = create_project(&standard_scripts());

    nps()
        .args(["--script", "deploy", "--dry-run"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ==================== Expected Failures ====================

#[test]
fn test_no_package_json() {
    let project = create_empty_project();

    nps()
        .current_dir(project.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No package.json found"));
}

#[test]
fn test_invalid_json_is_warning() {
    let project = create_project_invalid_json();

    nps()
        .current_dir(project.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Warning: Failed to parse"));
}

#[test]
fn test_no_scripts() {
    let project = create_project_no_scripts();

    nps()
        .current_dir(project.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No scripts defined"));
}

#[test]
fn test_workspace_without_workspaces() {
    let project = create_project(&standard_scripts());

    nps()
        .arg("workspace")
        .current_dir(project.path())
        .assert()
        .code(6)
        .stderr(predicate::str::contains("No workspaces declared"));
}

#[test]
fn test_broken_cli_config_is_error() {
    let project = create_project(&standard_scripts());
    let config = write_file(project.path(), "custom.toml", "select = [");

    nps()
        .arg("--config")
        .arg(&config)
        .current_dir(project.path())
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Invalid config"));
}

// ==================== Workspaces ====================

#[test]
fn test_workspace_solo_picker_by_label() {
    let repo = create_monorepo();
    let dir = canonical(&repo).join("packages").join("web");

    nps()
        .args(["workspace", "--script", "web  build", "--dry-run"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(format!("Would run: cd {} && npm run build\n", dir.display()));
}

#[test]
fn test_workspace_two_step_by_name() {
    let repo = create_monorepo();
    let dir = canonical(&repo).join("packages").join("api");

    nps()
        .args(["workspace", "--no-solo", "--workspace", "api", "--script", "start", "--dry-run"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(format!("Would run: cd {} && npm run start\n", dir.display()));
}

#[test]
fn test_workspace_without_scripts_is_notice() {
    let repo = create_monorepo();

    nps()
        .args(["workspace", "--no-solo", "--workspace", "docs", "--dry-run"])
        .current_dir(repo.path())
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_config_file_turns_off_solo_picker() {
    let repo = create_monorepo();
    write_file(repo.path(), ".npsrc.toml", "workspace_script_solo_picker = false\n");

    // The two-step picker matches by workspace then script name
    nps()
        .args(["workspace", "--workspace", "web", "--script", "dev", "--dry-run"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::ends_with("npm run dev\n"));
}

// ==================== Buffer and Bulk Scan ====================

#[test]
fn test_buffer_uses_closest_manifest() {
    let repo = create_monorepo();
    write_file(repo.path(), "packages/web/src/main.ts", "export {}\n");
    let dir = canonical(&repo).join("packages").join("web");

    nps()
        .args(["buffer", "packages/web/src/main.ts", "--script", "dev", "--dry-run"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(format!("Would run: cd {} && npm run dev\n", dir.display()));
}

#[test]
fn test_all_scans_every_manifest() {
    let repo = create_monorepo();
    write_file(repo.path(), "node_modules/left-pad/package.json", r#"{"name": "left-pad", "scripts": {"start": "x"}}"#);
    let dir = canonical(&repo).join("packages").join("api");

    nps()
        .args(["all", "--scan", "walk", "--script", "api: start", "--dry-run"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(format!("Would run: cd {} && npm run start\n", dir.display()));
}

#[test]
fn test_all_reports_broken_manifests_once() {
    let repo = create_monorepo();
    write_file(repo.path(), "tools/a/package.json", "{");
    write_file(repo.path(), "tools/b/package.json", "nope");

    nps()
        .args(["all", "--scan", "walk", "--script", "monorepo: check", "--dry-run"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("2 of 6 package.json files could not be read"))
        .stdout(predicate::str::ends_with("npm run check\n"));
}

#[test]
fn test_no_config_ignores_project_file() {
    let project = create_project_with_config(&standard_scripts(), "package_manager = \"bun\"\n");

    nps()
        .args(["--script", "build", "--dry-run"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::ends_with("bun run build\n"));

    nps()
        .args(["--script", "build", "--dry-run", "--no-config"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::ends_with("npm run build\n"));
}

#[test]
fn test_debug_header() {
    let project = create_project(&standard_scripts());

    nps()
        .args(["--debug", "--script", "build", "--dry-run"])
        .current_dir(project.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("=== nps debug mode ==="))
        .stderr(predicate::str::contains("Package manager = npm"));
}

#[test]
fn test_debug_shows_declared_package_manager() {
    let project = create_project_with_lockfile(&standard_scripts(), LockfileType::Pnpm);
    write_file(
        project.path(),
        "package.json",
        r#"{"name": "app", "packageManager": "pnpm@8.15.0", "scripts": {"build": "tsc"}}"#,
    );

    nps()
        .args(["--debug", "--script", "build", "--dry-run", "--no-config"])
        .current_dir(project.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "packageManager field = pnpm@8.15.0 (matching lock file present)",
        ));
}
