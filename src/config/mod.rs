//! Configuration module for nps.
//!
//! Handles loading and merging configuration from multiple sources:
//! - CLI arguments (per-call layer, highest priority)
//! - Project-level `.npsrc.toml` or `--config <path>` (process-wide layer)
//! - User-level `~/.config/nps/config.toml` (process-wide layer)
//! - Built-in defaults

pub mod file;
mod settings;
mod types;

pub use file::{
    generate_example_config, load_layers, load_options, load_options_from_path,
    unknown_placeholders,
};
pub use settings::Settings;
pub use types::{
    Config, Options, RunScript, SelectBackend, DEFAULT_SCRIPT_FORMAT, DEFAULT_SCRIPT_PROMPT,
    DEFAULT_WORKSPACE_FORMAT, DEFAULT_WORKSPACE_PROMPT,
};
