//! Script flattening and the selection prompt.
//!
//! Manifests are flattened into [`ScriptItem`]s, rendered into [`Choice`]s
//! and handed to a [`Selector`]. The interactive picker lives in
//! [`crate::tui`].

mod items;
mod named;
mod plain;
mod prompt;

pub use items::{flatten, root_items, workspace_items, workspace_script_items, ScriptItem};
pub use named::NamedSelector;
pub use plain::PlainSelector;
pub use prompt::{
    render_template, select, Choice, Selectable, SelectKind, SelectOptions, SelectPrompt,
    Selector, PLACEHOLDERS,
};
