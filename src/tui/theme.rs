//! Styles for the picker.
//!
//! Every style is a color plus modifiers. A monochrome theme keeps the
//! modifiers and drops the colors, so the picker stays readable under
//! `NO_COLOR`.

use ratatui::style::{Color, Modifier, Style};

/// Styles for the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    color: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Theme {
    /// Create a colored or monochrome theme.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Pick a theme from the environment. `NO_COLOR` disables colors.
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::new(!no_color)
    }

    /// Whether colors are used.
    pub fn is_colored(&self) -> bool {
        self.color
    }

    fn paint(&self, fg: Color, modifier: Modifier) -> Style {
        let style = Style::default().add_modifier(modifier);
        if self.color {
            style.fg(fg)
        } else {
            style
        }
    }

    /// Title bar.
    pub fn header(&self) -> Style {
        let style = self.paint(Color::White, Modifier::BOLD);
        if self.color {
            style.bg(Color::Blue)
        } else {
            style.add_modifier(Modifier::REVERSED)
        }
    }

    /// Filter text while not editing.
    pub fn filter(&self) -> Style {
        self.paint(Color::Yellow, Modifier::empty())
    }

    /// Filter text while typing.
    pub fn filter_active(&self) -> Style {
        self.paint(Color::Yellow, Modifier::BOLD)
    }

    /// Hint shown when the filter is empty.
    pub fn filter_placeholder(&self) -> Style {
        self.paint(Color::DarkGray, Modifier::ITALIC)
    }

    /// Quick-select digits.
    pub fn number(&self) -> Style {
        self.paint(Color::Cyan, Modifier::DIM)
    }

    /// Unselected choice labels.
    pub fn choice(&self) -> Style {
        self.paint(Color::White, Modifier::empty())
    }

    /// The highlighted row. Underlined when there is no background to show.
    pub fn selected(&self) -> Style {
        if self.color {
            self.paint(Color::White, Modifier::BOLD).bg(Color::Blue)
        } else {
            self.paint(Color::Reset, Modifier::BOLD | Modifier::UNDERLINED)
        }
    }

    /// Characters matched by the filter.
    pub fn matched(&self) -> Style {
        self.paint(Color::Yellow, Modifier::BOLD)
    }

    /// Command or path of the highlighted choice.
    pub fn detail(&self) -> Style {
        self.paint(Color::DarkGray, Modifier::ITALIC)
    }

    /// Rule above the detail line.
    pub fn separator(&self) -> Style {
        self.paint(Color::DarkGray, Modifier::empty())
    }

    /// Key hints.
    pub fn footer(&self) -> Style {
        self.paint(Color::DarkGray, Modifier::empty())
    }

    /// Key names inside hints and help.
    pub fn key(&self) -> Style {
        self.paint(Color::Cyan, Modifier::BOLD)
    }

    /// Plain bold.
    pub fn bold(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }
}
