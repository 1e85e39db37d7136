//! Reading package.json files from disk.

use std::path::Path;

use serde_json::Value;

use super::types::Manifest;
use crate::error::{NpsError, Result};

/// File name every manifest lookup matches against.
pub const MANIFEST_FILE: &str = "package.json";

/// Read and parse a package.json file.
///
/// Every call reads the file again; nothing is cached.
///
/// # Errors
///
/// Returns [`NpsError::NotReadable`] if the file cannot be opened and
/// [`NpsError::ParseError`] if it is not valid UTF-8 JSON.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use npm_scripts::package::read_manifest;
///
/// let manifest = read_manifest(Path::new("package.json")).unwrap();
/// println!("{} has {} scripts", manifest.display_name(), manifest.scripts().len());
/// ```
pub fn read_manifest(path: &Path) -> Result<Manifest> {
    let bytes = std::fs::read(path).map_err(|source| NpsError::NotReadable {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|e| NpsError::ParseError {
        path: path.to_path_buf(),
        message: format!("not valid UTF-8: {}", e.utf8_error()),
    })?;

    parse_manifest(path, &content)
}

/// Parse package.json content that was read from `path`.
///
/// # Errors
///
/// Returns [`NpsError::ParseError`] if the content is not valid JSON.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use npm_scripts::package::parse_manifest;
///
/// let json = r#"{"name": "app", "scripts": {"dev": "vite", "build": "vite build"}}"#;
/// let manifest = parse_manifest(Path::new("package.json"), json).unwrap();
/// assert_eq!(manifest.scripts().len(), 2);
/// ```
pub fn parse_manifest(path: &Path, content: &str) -> Result<Manifest> {
    let json: Value =
        serde_json::from_str(content).map_err(|e| NpsError::parse(path, content, &e))?;

    // A document that is valid JSON but not an object has nothing we can use.
    let mut manifest = match json {
        Value::Object(_) => {
            serde_json::from_value(json).map_err(|e| NpsError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        }
        _ => Manifest::default(),
    };
    manifest.set_path(path.to_path_buf());

    Ok(manifest)
}
