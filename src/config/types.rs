//! Configuration type definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::package::{PackageManager, ScanStrategy};

/// Default prompt when picking a script.
pub const DEFAULT_SCRIPT_PROMPT: &str = "Select a script";
/// Default template for script items.
pub const DEFAULT_SCRIPT_FORMAT: &str = "{label}";
/// Default prompt when picking a workspace.
pub const DEFAULT_WORKSPACE_PROMPT: &str = "Select a workspace";
/// Default template for workspace items.
pub const DEFAULT_WORKSPACE_FORMAT: &str = "{name}";

/// Which selection prompt to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectBackend {
    /// Full-screen picker on a terminal, numbered list otherwise.
    #[default]
    Auto,
    /// Always the full-screen picker.
    Tui,
    /// Always the numbered list.
    Plain,
}

impl fmt::Display for SelectBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectBackend::Auto => "auto",
            SelectBackend::Tui => "tui",
            SelectBackend::Plain => "plain",
        };
        write!(f, "{name}")
    }
}

impl FromStr for SelectBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(SelectBackend::Auto),
            "tui" => Ok(SelectBackend::Tui),
            "plain" => Ok(SelectBackend::Plain),
            _ => Err(format!(
                "Unknown select backend: '{s}'. Valid options: auto, tui, plain"
            )),
        }
    }
}

/// What happens to a resolved run request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunScript {
    /// Start the package manager.
    #[default]
    Spawn,
    /// Print the command instead of running it.
    Print,
}

impl fmt::Display for RunScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunScript::Spawn => write!(f, "spawn"),
            RunScript::Print => write!(f, "print"),
        }
    }
}

/// One configuration layer. Unset keys defer to lower layers.
///
/// Field names double as TOML keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Selection prompt backend.
    pub select: Option<SelectBackend>,
    /// Prompt when picking a script.
    pub select_script_prompt: Option<String>,
    /// Template for script items.
    pub select_script_format_item: Option<String>,
    /// Prompt when picking a workspace.
    pub select_workspace_prompt: Option<String>,
    /// Template for workspace items.
    pub select_workspace_format_item: Option<String>,
    /// Package manager override. Unset means infer from lock files.
    pub package_manager: Option<PackageManager>,
    /// One flattened workspace+script picker instead of two steps.
    pub workspace_script_solo_picker: Option<bool>,
    /// Spawn or print the command.
    pub run_script: Option<RunScript>,
    /// How the bulk scan discovers manifests.
    pub scan_strategy: Option<ScanStrategy>,
}

impl Options {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge two layers. Keys set in `over` win.
    ///
    /// # Examples
    ///
    /// ```
    /// use npm_scripts::config::Options;
    /// use npm_scripts::package::PackageManager;
    ///
    /// let base = Options {
    ///     package_manager: Some(PackageManager::Yarn),
    ///     select_script_prompt: Some("Run".to_string()),
    ///     ..Options::default()
    /// };
    /// let over = Options {
    ///     package_manager: Some(PackageManager::Pnpm),
    ///     ..Options::default()
    /// };
    ///
    /// let merged = base.merge(over);
    /// assert_eq!(merged.package_manager, Some(PackageManager::Pnpm));
    /// assert_eq!(merged.select_script_prompt.as_deref(), Some("Run"));
    /// ```
    pub fn merge(self, over: Options) -> Options {
        Options {
            select: over.select.or(self.select),
            select_script_prompt: over.select_script_prompt.or(self.select_script_prompt),
            select_script_format_item: over
                .select_script_format_item
                .or(self.select_script_format_item),
            select_workspace_prompt: over
                .select_workspace_prompt
                .or(self.select_workspace_prompt),
            select_workspace_format_item: over
                .select_workspace_format_item
                .or(self.select_workspace_format_item),
            package_manager: over.package_manager.or(self.package_manager),
            workspace_script_solo_picker: over
                .workspace_script_solo_picker
                .or(self.workspace_script_solo_picker),
            run_script: over.run_script.or(self.run_script),
            scan_strategy: over.scan_strategy.or(self.scan_strategy),
        }
    }

    /// Whether no key is set.
    pub fn is_empty(&self) -> bool {
        *self == Options::default()
    }

    /// Item templates set in this layer, with their key names.
    pub fn templates(&self) -> Vec<(&'static str, &str)> {
        [
            ("select_script_format_item", &self.select_script_format_item),
            ("select_workspace_format_item", &self.select_workspace_format_item),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}

/// Fully resolved configuration for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Selection prompt backend.
    pub select: SelectBackend,
    /// Prompt when picking a script.
    pub select_script_prompt: String,
    /// Template for script items.
    pub select_script_format_item: String,
    /// Prompt when picking a workspace.
    pub select_workspace_prompt: String,
    /// Template for workspace items.
    pub select_workspace_format_item: String,
    /// Package manager override.
    pub package_manager: Option<PackageManager>,
    /// One flattened workspace+script picker instead of two steps.
    pub workspace_script_solo_picker: bool,
    /// Spawn or print the command.
    pub run_script: RunScript,
    /// How the bulk scan discovers manifests.
    pub scan_strategy: ScanStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_options(Options::default())
    }
}

impl Config {
    /// Fill unset keys of `options` with built-in defaults.
    pub fn from_options(options: Options) -> Self {
        Self {
            select: options.select.unwrap_or_default(),
            select_script_prompt: options
                .select_script_prompt
                .unwrap_or_else(|| DEFAULT_SCRIPT_PROMPT.to_string()),
            select_script_format_item: options
                .select_script_format_item
                .unwrap_or_else(|| DEFAULT_SCRIPT_FORMAT.to_string()),
            select_workspace_prompt: options
                .select_workspace_prompt
                .unwrap_or_else(|| DEFAULT_WORKSPACE_PROMPT.to_string()),
            select_workspace_format_item: options
                .select_workspace_format_item
                .unwrap_or_else(|| DEFAULT_WORKSPACE_FORMAT.to_string()),
            package_manager: options.package_manager,
            workspace_script_solo_picker: options.workspace_script_solo_picker.unwrap_or(true),
            run_script: options.run_script.unwrap_or_default(),
            scan_strategy: options.scan_strategy.unwrap_or_default(),
        }
    }
}
