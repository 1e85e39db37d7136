//! Integration tests for package manager inference.
//!
//! Inference looks for lock files from the starting directory upward and
//! falls back to npm.

use npm_scripts::package::{infer_package_manager_within, PackageManager};

use crate::fixtures::{
    canonical, create_monorepo, create_project, create_project_with_lockfile, standard_scripts,
    write_file, LockfileType,
};

fn infer(temp: &tempfile::TempDir, rel: &str) -> PackageManager {
    let root = canonical(temp);
    infer_package_manager_within(&root.join(rel), Some(&root)).0
}

// ==================== Lock File Detection ====================

#[test]
fn test_detect_from_each_lockfile() {
    let cases = [
        (LockfileType::Npm, PackageManager::Npm),
        (LockfileType::Yarn, PackageManager::Yarn),
        (LockfileType::Pnpm, PackageManager::Pnpm),
        (LockfileType::Bun, PackageManager::Bun),
    ];

    for (lockfile, expected) in cases {
        let project = create_project_with_lockfile(&standard_scripts(), lockfile);
        assert_eq!(infer(&project, ""), expected, "{lockfile:?}");
    }
}

#[test]
fn test_default_is_npm() {
    let project = create_project(&standard_scripts());
    let (pm, reason) = infer_package_manager_within(&canonical(&project), Some(&canonical(&project)));

    assert_eq!(pm, PackageManager::Npm);
    assert!(reason.contains("default"));
}

#[test]
fn test_bun_text_lockfile() {
    let project = create_project(&standard_scripts());
    write_file(project.path(), "bun.lock", "{}");
    assert_eq!(infer(&project, ""), PackageManager::Bun);
}

// ==================== Upward Search ====================

#[test]
fn test_workspace_uses_root_lockfile() {
    let repo = create_monorepo();
    write_file(repo.path(), "pnpm-lock.yaml", "lockfileVersion: '9.0'\n");

    assert_eq!(infer(&repo, "packages/web"), PackageManager::Pnpm);
}

#[test]
fn test_closest_lockfile_wins() {
    let repo = create_monorepo();
    write_file(repo.path(), "yarn.lock", "");
    write_file(repo.path(), "packages/api/package-lock.json", "{}");

    assert_eq!(infer(&repo, "packages/api"), PackageManager::Npm);
    assert_eq!(infer(&repo, "packages/web"), PackageManager::Yarn);
}

#[test]
fn test_search_stops_at_boundary() {
    let repo = create_monorepo();
    write_file(repo.path(), "yarn.lock", "");
    let web = canonical(&repo).join("packages").join("web");

    let (pm, _) = infer_package_manager_within(&web, Some(&web));
    assert_eq!(pm, PackageManager::Npm);
}
