//! Type definitions for package.json decoding.
//!
//! Decoding is lenient: a field with an unexpected shape is treated as
//! absent instead of failing the whole manifest.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Name shown for manifests that do not declare one.
pub const UNKNOWN_NAME: &str = "unknown";

/// A parsed package.json.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// Location of the file this manifest was read from.
    #[serde(skip)]
    path: PathBuf,

    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,

    #[serde(default, deserialize_with = "lenient_scripts")]
    scripts: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "lenient_workspaces")]
    workspaces: Option<Vec<String>>,

    #[serde(
        default,
        rename = "packageManager",
        deserialize_with = "lenient_string"
    )]
    package_manager: Option<String>,
}

impl Manifest {
    /// Build a manifest in memory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set the package name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a script.
    pub fn with_script(mut self, name: impl Into<String>, command: impl Into<String>) -> Self {
        self.scripts.insert(name.into(), command.into());
        self
    }

    /// Set the workspace patterns.
    pub fn with_workspaces<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.workspaces = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the `packageManager` field.
    pub fn with_package_manager(mut self, spec: impl Into<String>) -> Self {
        self.package_manager = Some(spec.into());
        self
    }

    pub(crate) fn set_path(&mut self, path: PathBuf) {
        self.path = path;
    }

    /// Path of the package.json file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the package.json file.
    pub fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Declared package name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Package name, or "unknown" if not set.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(UNKNOWN_NAME)
    }

    /// Scripts keyed by name.
    pub fn scripts(&self) -> &BTreeMap<String, String> {
        &self.scripts
    }

    /// Check if this manifest has any scripts.
    pub fn has_scripts(&self) -> bool {
        !self.scripts.is_empty()
    }

    /// Workspace glob patterns, if declared.
    pub fn workspaces(&self) -> Option<&[String]> {
        self.workspaces.as_deref()
    }

    /// Raw `packageManager` field (e.g. "pnpm@8.0.0").
    pub fn package_manager(&self) -> Option<&str> {
        self.package_manager.as_deref()
    }

    /// Extract the package manager name from the packageManager field.
    pub fn package_manager_name(&self) -> Option<&str> {
        self.package_manager
            .as_deref()
            .map(|pm| pm.split('@').next().unwrap_or(pm))
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.path.display())
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Non-object `scripts` decode as empty; non-string commands are dropped.
fn lenient_scripts<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(name, command)| match command {
                Value::String(command) => Some((name, command)),
                _ => None,
            })
            .collect(),
        _ => BTreeMap::new(),
    })
}

/// Accepts `["a/*"]` and `{ "packages": ["a/*"] }`.
fn lenient_workspaces<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    fn strings(items: Vec<Value>) -> Vec<String> {
        items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(strings(items)),
        Value::Object(mut obj) => match obj.remove("packages") {
            Some(Value::Array(items)) => Some(strings(items)),
            _ => None,
        },
        _ => None,
    })
}
