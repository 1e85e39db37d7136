//! Utility module for nps.
//!
//! Common utilities for paths and terminal handling.

mod paths;
mod terminal;

pub use paths::{
    ancestors_within, config_dir, global_config_file, local_config_file, search_boundary,
    LOCAL_CONFIG_FILE,
};
pub use terminal::{
    check_terminal_size, cleanup_terminal, is_interactive, TerminalSize, MIN_HEIGHT, MIN_WIDTH,
};
