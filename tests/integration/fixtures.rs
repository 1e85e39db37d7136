//! Test fixtures for creating temporary projects.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Lock file flavours.
#[derive(Debug, Clone, Copy)]
pub enum LockfileType {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl LockfileType {
    pub fn file_name(self) -> &'static str {
        match self {
            LockfileType::Npm => "package-lock.json",
            LockfileType::Yarn => "yarn.lock",
            LockfileType::Pnpm => "pnpm-lock.yaml",
            LockfileType::Bun => "bun.lockb",
        }
    }
}

/// Scripts most projects have.
pub fn standard_scripts() -> Vec<(&'static str, &'static str)> {
    vec![
        ("build", "tsc"),
        ("dev", "vite"),
        ("lint", "eslint ."),
        ("test", "vitest"),
    ]
}

/// Write `content` to `rel` under `dir`, creating parent directories.
pub fn write_file(dir: &Path, rel: &str, content: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directory");
    }
    fs::write(&path, content).expect("Failed to write file");
    path
}

/// package.json content with `name` and `scripts`.
pub fn manifest_json(name: Option<&str>, scripts: &[(&str, &str)]) -> String {
    let mut value = serde_json::json!({});
    if let Some(name) = name {
        value["name"] = serde_json::json!(name);
    }
    let scripts: serde_json::Map<String, serde_json::Value> = scripts
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::json!(v)))
        .collect();
    value["scripts"] = serde_json::Value::Object(scripts);
    serde_json::to_string_pretty(&value).expect("Failed to serialize package.json")
}

/// A project with a package.json holding `scripts`.
pub fn create_project(scripts: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    write_file(temp.path(), "package.json", &manifest_json(Some("app"), scripts));
    temp
}

/// A project whose package.json has no scripts.
pub fn create_project_no_scripts() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    write_file(temp.path(), "package.json", r#"{"name": "empty"}"#);
    temp
}

/// A project whose package.json is not valid JSON.
pub fn create_project_invalid_json() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    write_file(temp.path(), "package.json", r#"{"name": "broken", "scripts": {"#);
    temp
}

/// A directory with no package.json at all.
pub fn create_empty_project() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A project with `scripts` and a lock file.
pub fn create_project_with_lockfile(scripts: &[(&str, &str)], lockfile: LockfileType) -> TempDir {
    let temp = create_project(scripts);
    write_file(temp.path(), lockfile.file_name(), "");
    temp
}

/// A project with `scripts` and a `.npsrc.toml`.
pub fn create_project_with_config(scripts: &[(&str, &str)], config: &str) -> TempDir {
    let temp = create_project(scripts);
    write_file(temp.path(), ".npsrc.toml", config);
    temp
}

/// A monorepo with workspaces `web` and `api` under `packages/`, plus a
/// `docs` workspace without scripts.
pub fn create_monorepo() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    write_file(
        temp.path(),
        "package.json",
        r#"{"name": "monorepo", "private": true, "workspaces": ["packages/*"], "scripts": {"check": "turbo run check"}}"#,
    );
    write_file(
        temp.path(),
        "packages/web/package.json",
        &manifest_json(Some("web"), &[("dev", "vite"), ("build", "vite build")]),
    );
    write_file(
        temp.path(),
        "packages/api/package.json",
        &manifest_json(Some("api"), &[("start", "node server.js")]),
    );
    write_file(temp.path(), "packages/docs/package.json", r#"{"name": "docs"}"#);
    temp
}

/// The canonical form of a temp dir path, as the binary sees it.
pub fn canonical(temp: &TempDir) -> PathBuf {
    temp.path().canonicalize().expect("Failed to canonicalize")
}
