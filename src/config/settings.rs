//! Layered settings.
//!
//! Built-in defaults, then a process-wide layer installed with
//! [`Settings::setup`], then a per-call layer passed to
//! [`Settings::resolve`]. Later layers win key by key.

use tracing::debug;

use super::types::{Config, Options};

/// Process-wide configuration state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    process: Options,
}

impl Settings {
    /// Settings with only built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings with `process` installed as the process-wide layer.
    pub fn with_layer(process: Options) -> Self {
        Self { process }
    }

    /// Replace the process-wide layer.
    ///
    /// Each call overwrites the previous layer wholesale; keys are never
    /// merged with an earlier `setup`.
    pub fn setup(&mut self, options: Options) {
        debug!(?options, "installing process-wide config layer");
        self.process = options;
    }

    /// The current process-wide layer.
    pub fn process_layer(&self) -> &Options {
        &self.process
    }

    /// Resolve the configuration for one operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use npm_scripts::config::{Options, Settings};
    ///
    /// let mut settings = Settings::new();
    /// settings.setup(Options {
    ///     select_script_prompt: Some("Run what?".to_string()),
    ///     ..Options::default()
    /// });
    ///
    /// let config = settings.resolve(&Options::default());
    /// assert_eq!(config.select_script_prompt, "Run what?");
    /// assert_eq!(config.select_workspace_prompt, "Select a workspace");
    /// ```
    pub fn resolve(&self, per_call: &Options) -> Config {
        Config::from_options(self.process.clone().merge(per_call.clone()))
    }
}
