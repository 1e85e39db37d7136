//! Configuration file loading and parsing.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::types::Options;
use crate::error::{NpsError, Result};
use crate::select::PLACEHOLDERS;
use crate::utils::{global_config_file, local_config_file};

/// Load one configuration layer from `path`.
///
/// # Errors
///
/// Returns [`NpsError::InvalidConfig`] if the file cannot be read or parsed.
pub fn load_options_from_path(path: &Path) -> Result<Options> {
    let content = fs::read_to_string(path).map_err(|e| NpsError::InvalidConfig {
        path: path.to_path_buf(),
        message: format!("Failed to read config file: {e}"),
    })?;

    let options: Options = toml::from_str(&content).map_err(|e| NpsError::InvalidConfig {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    for (key, template) in options.templates() {
        for name in unknown_placeholders(template) {
            eprintln!(
                "Warning: {key} in {} uses unknown placeholder {{{name}}}",
                path.display()
            );
        }
    }

    debug!(path = %path.display(), "loaded config");
    Ok(options)
}

/// Load the process-wide configuration layer.
///
/// With `cli_config_path` only that file is read and a failure is an error.
/// Otherwise the user file `~/.config/nps/config.toml` is merged with the
/// project file `.npsrc.toml` in `project_dir` (project wins); missing files
/// are skipped and broken ones produce a warning.
///
/// # Arguments
///
/// * `cli_config_path` - Optional path given with `--config`
/// * `project_dir` - Directory searched for `.npsrc.toml`
///
/// # Errors
///
/// Returns an error if the file given with `--config` cannot be loaded.
pub fn load_options(cli_config_path: Option<&Path>, project_dir: &Path) -> Result<Options> {
    match cli_config_path {
        Some(path) => load_options_from_path(path),
        None => Ok(load_layers(
            global_config_file().as_deref(),
            &local_config_file(project_dir),
        )),
    }
}

/// Merge the user file with the project file. Either may be missing.
pub fn load_layers(user_file: Option<&Path>, project_file: &Path) -> Options {
    let user = user_file.map(load_optional).unwrap_or_default();
    let project = load_optional(project_file);
    user.merge(project)
}

/// Load a file that may be absent. Broken files are reported and skipped.
fn load_optional(path: &Path) -> Options {
    if !path.is_file() {
        return Options::default();
    }

    match load_options_from_path(path) {
        Ok(options) => options,
        Err(e) => {
            debug!(path = %path.display(), "ignoring broken config file");
            eprintln!("Warning: {e}");
            Options::default()
        }
    }
}

/// Placeholders in `template` that no item understands.
///
/// # Examples
///
/// ```
/// use npm_scripts::config::unknown_placeholders;
///
/// assert!(unknown_placeholders("{label} -> {command}").is_empty());
/// assert_eq!(unknown_placeholders("{lable}"), vec!["lable"]);
/// ```
pub fn unknown_placeholders(template: &str) -> Vec<String> {
    let mut unknown = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        let name = &after[..close];
        if !PLACEHOLDERS.contains(&name) {
            unknown.push(name.to_string());
        }
        rest = &after[close + 1..];
    }

    unknown
}

/// Generate an example configuration file with all options documented.
pub fn generate_example_config() -> String {
    r#"# nps Configuration File
# Place this file at ~/.config/nps/config.toml for global settings
# or .npsrc.toml in your project directory for project-specific settings.
# Every key is optional; command-line flags override both files.

# Selection prompt: "auto", "tui", "plain"
# auto uses the full-screen picker on a terminal and a numbered list otherwise
select = "auto"

# Prompt and item template when picking a script.
# Placeholders: {label}, {name}, {script}, {scope}, {command}, {path}
select_script_prompt = "Select a script"
select_script_format_item = "{label}"

# Prompt and item template when picking a workspace.
# Placeholders: {name}, {path}
select_workspace_prompt = "Select a workspace"
select_workspace_format_item = "{name}"

# Package manager (overrides lock-file detection)
# Options: "npm", "yarn", "pnpm", "bun"
# package_manager = "pnpm"

# Pick workspace scripts from one flattened list (true)
# or choose a workspace first, then a script (false)
workspace_script_solo_picker = true

# What to do with the chosen script: "spawn" runs it, "print" shows the command
run_script = "spawn"

# How `nps all` finds package.json files: "auto", "walk", "fd"
scan_strategy = "auto"
"#
    .to_string()
}
