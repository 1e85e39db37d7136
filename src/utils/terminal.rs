//! Terminal utilities.

use std::io::{self, IsTerminal, Write};

use crossterm::terminal::{self, LeaveAlternateScreen};
use crossterm::{cursor, execute};

/// Smallest terminal the picker is drawn in.
pub const MIN_WIDTH: u16 = 20;
pub const MIN_HEIGHT: u16 = 5;

/// Terminal size information.
#[derive(Debug, Clone, Copy)]
pub struct TerminalSize {
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl TerminalSize {
    /// Check if the terminal is large enough for the picker.
    pub fn is_valid(&self) -> bool {
        self.width >= MIN_WIDTH && self.height >= MIN_HEIGHT
    }
}

/// Check the terminal size.
///
/// Returns the current terminal size, or None if it cannot be determined.
pub fn check_terminal_size() -> Option<TerminalSize> {
    terminal::size()
        .ok()
        .map(|(width, height)| TerminalSize { width, height })
}

/// Whether an interactive picker can be shown.
///
/// Requires stdin and stdout to be terminals and a usable terminal size.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal()
        && io::stdout().is_terminal()
        && check_terminal_size().is_some_and(|size| size.is_valid())
}

/// Cleanup terminal completely.
///
/// Called on error paths so a failed picker never leaves the terminal in
/// raw mode or on the alternate screen.
///
/// # Errors
///
/// Returns an error if stdout cannot be flushed.
pub fn cleanup_terminal() -> io::Result<()> {
    let _ = terminal::disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
    io::stdout().flush()
}
