//! Flattening manifests into selectable script items.

use std::path::{Path, PathBuf};

use crate::package::{Manifest, WorkspaceEntry, Workspaces};

/// One runnable script, ready to be listed in a picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptItem {
    /// Display label.
    label: String,
    /// Manifest or workspace the script belongs to.
    scope: String,
    /// Script name as declared in package.json.
    script: String,
    /// Directory the script runs in.
    dir: PathBuf,
    /// Raw command text.
    command: String,
}

impl ScriptItem {
    /// Create a new script item.
    pub fn new(
        label: impl Into<String>,
        scope: impl Into<String>,
        script: impl Into<String>,
        dir: impl Into<PathBuf>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            scope: scope.into(),
            script: script.into(),
            dir: dir.into(),
            command: command.into(),
        }
    }

    /// Get the display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the scope name.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Get the script name.
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Get the working directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the raw command.
    pub fn command(&self) -> &str {
        &self.command
    }
}

/// Flatten the scripts of every manifest into one list.
///
/// Each script becomes one item labelled `"<name>: <script>"`, where the
/// name is `"unknown"` for manifests without one. Manifests without scripts
/// contribute nothing.
///
/// # Examples
///
/// ```
/// use npm_scripts::package::Manifest;
/// use npm_scripts::select::flatten;
///
/// let manifests = vec![
///     Manifest::new("web/package.json").with_name("web").with_script("dev", "vite"),
///     Manifest::new("api/package.json").with_script("start", "node ."),
/// ];
///
/// let labels: Vec<_> = flatten(&manifests).iter().map(|i| i.label().to_string()).collect();
/// assert_eq!(labels, vec!["web: dev", "unknown: start"]);
/// ```
pub fn flatten(manifests: &[Manifest]) -> Vec<ScriptItem> {
    manifests
        .iter()
        .flat_map(|manifest| {
            let scope = manifest.display_name();
            manifest.scripts().iter().map(move |(script, command)| {
                ScriptItem::new(
                    format!("{scope}: {script}"),
                    scope,
                    script,
                    manifest.dir(),
                    command,
                )
            })
        })
        .collect()
}

/// Items for a single manifest, labelled by script name alone.
pub fn root_items(manifest: &Manifest) -> Vec<ScriptItem> {
    let scope = manifest.display_name();
    manifest
        .scripts()
        .iter()
        .map(|(script, command)| ScriptItem::new(script, scope, script, manifest.dir(), command))
        .collect()
}

/// Items for every script of every workspace, labelled
/// `"<workspace>  <script>"`.
pub fn workspace_items(workspaces: &Workspaces) -> Vec<ScriptItem> {
    workspaces
        .values()
        .flat_map(|entry| scripts_of(entry, move |script| format!("{}  {script}", entry.name())))
        .collect()
}

/// Items for one workspace, labelled by script name alone.
pub fn workspace_script_items(entry: &WorkspaceEntry) -> Vec<ScriptItem> {
    scripts_of(entry, str::to_string).collect()
}

fn scripts_of<'a>(
    entry: &'a WorkspaceEntry,
    label: impl Fn(&str) -> String + 'a,
) -> impl Iterator<Item = ScriptItem> + 'a {
    entry
        .manifest()
        .scripts()
        .iter()
        .map(move |(script, command)| {
            ScriptItem::new(label(script.as_str()), entry.name(), script, entry.dir(), command)
        })
}
