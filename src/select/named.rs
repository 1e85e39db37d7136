//! Non-interactive picker driven by names given on the command line.

use anyhow::Result;
use tracing::{debug, warn};

use super::prompt::{Choice, SelectKind, SelectPrompt, Selector};

/// Picks entries by name instead of asking.
///
/// A script is matched by its exact label first, then by script name
/// (restricted to the named workspace when one is given). A workspace is
/// matched by name. When no name is set for the kind being asked, the
/// fallback selector is used; without a fallback the prompt is cancelled.
pub struct NamedSelector {
    script: Option<String>,
    workspace: Option<String>,
    fallback: Option<Box<dyn Selector>>,
}

impl NamedSelector {
    /// Create a selector for the given names.
    pub fn new(script: Option<String>, workspace: Option<String>) -> Self {
        Self {
            script,
            workspace,
            fallback: None,
        }
    }

    /// Ask `fallback` for anything no name was given for.
    pub fn with_fallback(mut self, fallback: Box<dyn Selector>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    fn find_script(&self, script: &str, choices: &[Choice]) -> Option<usize> {
        if let Some(index) = choices.iter().position(|c| c.label == script) {
            return Some(index);
        }

        choices.iter().position(|c| {
            c.key == script
                && match (&self.workspace, &c.scope) {
                    (Some(workspace), Some(scope)) => workspace == scope,
                    _ => true,
                }
        })
    }
}

impl Selector for NamedSelector {
    fn choose(&self, choices: &[Choice], prompt: &SelectPrompt) -> Result<Option<usize>> {
        let (wanted, found) = match prompt.kind {
            SelectKind::Script => match &self.script {
                Some(script) => (script, self.find_script(script, choices)),
                None => return self.delegate(choices, prompt),
            },
            SelectKind::Workspace => match &self.workspace {
                Some(workspace) => (workspace, choices.iter().position(|c| &c.key == workspace)),
                None => return self.delegate(choices, prompt),
            },
        };

        match found {
            Some(index) => debug!(name = %wanted, index, "picked by name"),
            None => warn!(name = %wanted, kind = ?prompt.kind, "no entry with that name"),
        }

        Ok(found)
    }
}

impl NamedSelector {
    fn delegate(&self, choices: &[Choice], prompt: &SelectPrompt) -> Result<Option<usize>> {
        match &self.fallback {
            Some(fallback) => fallback.choose(choices, prompt),
            None => Ok(None),
        }
    }
}
