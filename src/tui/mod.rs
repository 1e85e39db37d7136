//! TUI module for nps.
//!
//! A full-screen picker used as the interactive [`Selector`].

mod app;
mod input;
mod layout;
mod theme;
mod ui;

pub use app::{App, AppMode};
pub use input::handle_event;
pub use layout::{centered_rect_fixed, PickerLayout};
pub use theme::Theme;
pub use ui::{render, run_picker, TerminalGuard};

use anyhow::Result;

use crate::select::{Choice, SelectPrompt, Selector};

/// Interactive terminal picker.
#[derive(Debug, Clone, Default)]
pub struct TuiSelector {
    theme: Theme,
}

impl TuiSelector {
    /// Create a picker with the given theme.
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Selector for TuiSelector {
    fn choose(&self, choices: &[Choice], prompt: &SelectPrompt) -> Result<Option<usize>> {
        if choices.is_empty() {
            return Ok(None);
        }
        let app = App::new(choices.to_vec(), prompt.title.clone(), prompt.kind);
        run_picker(app, &self.theme)
    }
}
