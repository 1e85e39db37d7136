//! The selection prompt seam.
//!
//! A [`Selector`] only ever sees rendered [`Choice`]s and answers with an
//! index. [`select`] renders items with the configured template, asks the
//! selector and hands the chosen item (or `None` on cancel) to a
//! continuation.

use anyhow::Result;
use tracing::debug;

use super::items::ScriptItem;
use crate::config::Config;
use crate::package::WorkspaceEntry;

/// Placeholder names understood by item templates.
pub const PLACEHOLDERS: &[&str] = &["label", "name", "script", "scope", "command", "path"];

/// Something that can be listed in a picker.
pub trait Selectable {
    /// Name used to pick the item non-interactively.
    fn key(&self) -> &str;

    /// Group the item belongs to, if any.
    fn scope(&self) -> Option<&str> {
        None
    }

    /// Secondary text shown next to the selected item.
    fn detail(&self) -> Option<String> {
        None
    }

    /// Value for a template placeholder, or `None` if unknown.
    fn placeholder(&self, name: &str) -> Option<String>;
}

impl Selectable for ScriptItem {
    fn key(&self) -> &str {
        self.script()
    }

    fn scope(&self) -> Option<&str> {
        Some(ScriptItem::scope(self))
    }

    fn detail(&self) -> Option<String> {
        Some(self.command().to_string())
    }

    fn placeholder(&self, name: &str) -> Option<String> {
        match name {
            "label" => Some(self.label().to_string()),
            "name" | "script" => Some(self.script().to_string()),
            "scope" => Some(ScriptItem::scope(self).to_string()),
            "command" => Some(self.command().to_string()),
            "path" => Some(self.dir().display().to_string()),
            _ => None,
        }
    }
}

impl Selectable for WorkspaceEntry {
    fn key(&self) -> &str {
        self.name()
    }

    fn detail(&self) -> Option<String> {
        Some(self.dir().display().to_string())
    }

    fn placeholder(&self, name: &str) -> Option<String> {
        match name {
            "label" | "name" | "scope" => Some(self.name().to_string()),
            "path" => Some(self.dir().display().to_string()),
            _ => None,
        }
    }
}

/// Render `template`, substituting `{placeholder}` fields from `item`.
///
/// Unknown placeholders are kept as written.
///
/// # Examples
///
/// ```
/// use npm_scripts::select::{render_template, ScriptItem};
///
/// let item = ScriptItem::new("web: dev", "web", "dev", "apps/web", "vite");
/// assert_eq!(render_template("{script} ({command})", &item), "dev (vite)");
/// assert_eq!(render_template("{nope}", &item), "{nope}");
/// ```
pub fn render_template<T: Selectable + ?Sized>(template: &str, item: &T) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after[..close];
        match item.placeholder(name) {
            Some(value) => out.push_str(&value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

/// What the user is being asked to pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectKind {
    /// A script to run.
    Script,
    /// A workspace whose scripts are listed next.
    Workspace,
}

/// A rendered entry handed to a [`Selector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Rendered label.
    pub label: String,
    /// Name used for non-interactive selection.
    pub key: String,
    /// Group the entry belongs to.
    pub scope: Option<String>,
    /// Secondary text (command or path).
    pub detail: Option<String>,
}

impl Choice {
    /// Render an item with `template`.
    pub fn from_item<T: Selectable + ?Sized>(item: &T, template: &str) -> Self {
        Self {
            label: render_template(template, item),
            key: item.key().to_string(),
            scope: item.scope().map(String::from),
            detail: item.detail(),
        }
    }
}

/// Prompt shown above the choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectPrompt {
    /// What is being selected.
    pub kind: SelectKind,
    /// Prompt text.
    pub title: String,
}

/// Options for one [`select`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOptions {
    /// What is being selected.
    pub kind: SelectKind,
    /// Prompt text.
    pub prompt: String,
    /// Item template.
    pub format_item: String,
}

impl SelectOptions {
    /// Options for picking a script.
    pub fn scripts(config: &Config) -> Self {
        Self {
            kind: SelectKind::Script,
            prompt: config.select_script_prompt.clone(),
            format_item: config.select_script_format_item.clone(),
        }
    }

    /// Options for picking a workspace.
    pub fn workspaces(config: &Config) -> Self {
        Self {
            kind: SelectKind::Workspace,
            prompt: config.select_workspace_prompt.clone(),
            format_item: config.select_workspace_format_item.clone(),
        }
    }
}

/// A selection prompt.
pub trait Selector {
    /// Ask the user to pick one of `choices`.
    ///
    /// Returns the index of the chosen entry, or `None` if the user
    /// cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt itself fails (e.g. the terminal is
    /// unavailable).
    fn choose(&self, choices: &[Choice], prompt: &SelectPrompt) -> Result<Option<usize>>;
}

impl<S: Selector + ?Sized> Selector for Box<S> {
    fn choose(&self, choices: &[Choice], prompt: &SelectPrompt) -> Result<Option<usize>> {
        (**self).choose(choices, prompt)
    }
}

/// Present `items` through `selector` and pass the outcome to `on_choice`.
///
/// `on_choice` receives `None` when the user cancels or the selector returns
/// an index that is out of range.
///
/// # Errors
///
/// Returns an error if the selector fails.
pub fn select<T, R>(
    selector: &dyn Selector,
    items: &[T],
    options: &SelectOptions,
    on_choice: impl FnOnce(Option<&T>) -> R,
) -> Result<R>
where
    T: Selectable,
{
    let choices: Vec<Choice> = items
        .iter()
        .map(|item| Choice::from_item(item, &options.format_item))
        .collect();
    let prompt = SelectPrompt {
        kind: options.kind,
        title: options.prompt.clone(),
    };

    let picked = selector.choose(&choices, &prompt)?;
    let chosen = picked.and_then(|index| items.get(index));

    match chosen {
        Some(item) => debug!(key = item.key(), "item selected"),
        None => debug!(kind = ?options.kind, "selection cancelled"),
    }

    Ok(on_choice(chosen))
}
