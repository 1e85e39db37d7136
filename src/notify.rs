//! User-facing notifications.
//!
//! Public operations never return their expected failures as errors; they
//! report them through a [`Notifier`] and return an exit code.

use std::cell::RefCell;
use std::fmt;

use tracing::debug;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Ordinary "nothing to do" outcomes.
    Info,
    /// Something went wrong but the program keeps going.
    Warn,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => write!(f, "info"),
            Level::Warn => write!(f, "warn"),
        }
    }
}

/// Receives user-facing messages.
pub trait Notifier {
    /// Deliver `message` at `level`.
    fn notify(&self, level: Level, message: &str);

    /// Informational notice.
    fn info(&self, message: &str) {
        self.notify(Level::Info, message);
    }

    /// Warning.
    fn warn(&self, message: &str) {
        self.notify(Level::Warn, message);
    }
}

/// Prints notices to stderr.
///
/// Notices are also traced at debug level so they line up with the rest of
/// the log when `--debug` is on.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, level: Level, message: &str) {
        debug!(target: "npm_scripts::notify", %level, "{message}");
        match level {
            Level::Info => eprintln!("{message}"),
            Level::Warn => eprintln!("Warning: {message}"),
        }
    }
}

/// Keeps every notice in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<(Level, String)>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices so far, oldest first.
    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.borrow().clone()
    }

    /// Notices at `level`.
    pub fn at(&self, level: Level) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: Level, message: &str) {
        self.messages.borrow_mut().push((level, message.to_string()));
    }
}
