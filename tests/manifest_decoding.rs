//! Integration tests for package.json decoding using fixtures.

use std::path::{Path, PathBuf};

use npm_scripts::error::NpsError;
use npm_scripts::package::{parse_manifest, read_manifest};

/// Path of a fixture file.
fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_basic_package() {
    let manifest = read_manifest(&fixture("basic.json")).unwrap();

    assert_eq!(manifest.display_name(), "basic-app");
    let names: Vec<&str> = manifest.scripts().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["build", "dev", "lint", "test"]);
    assert_eq!(manifest.scripts()["dev"], "vite");
    assert!(manifest.workspaces().is_none());
    assert_eq!(manifest.dir(), fixture("basic.json").parent().unwrap());
}

#[test]
fn test_odd_field_shapes_are_tolerated() {
    let manifest = read_manifest(&fixture("odd-shapes.json")).unwrap();

    // A non-string name counts as missing
    assert_eq!(manifest.name(), None);
    assert_eq!(manifest.display_name(), "unknown");

    let names: Vec<&str> = manifest.scripts().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["clean", "dev"]);

    assert_eq!(
        manifest.workspaces(),
        Some(&["apps/*".to_string(), "libs/*".to_string()][..])
    );
    assert_eq!(manifest.package_manager(), Some("pnpm@9.1.0"));
}

#[test]
fn test_scripts_array_means_no_scripts() {
    let manifest = read_manifest(&fixture("scripts-array.json")).unwrap();

    assert!(!manifest.has_scripts());
    assert!(manifest.workspaces().is_none());
}

#[test]
fn test_invalid_json_reports_location() {
    let err = parse_manifest(Path::new("package.json"), "{\n  \"name\": \"x\",\n}").unwrap_err();

    match err {
        NpsError::ParseError { path, message } => {
            assert_eq!(path, Path::new("package.json"));
            assert!(message.contains("line 3"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_missing_file_is_not_readable() {
    let err = read_manifest(&fixture("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, NpsError::NotReadable { .. }));
}

#[test]
fn test_non_object_document_is_empty() {
    let manifest = parse_manifest(Path::new("package.json"), "[1, 2, 3]").unwrap();
    assert!(!manifest.has_scripts());
    assert_eq!(manifest.display_name(), "unknown");
}
