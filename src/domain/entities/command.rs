use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{BotContext, CommandModule, Interaction};
use crate::application::errors::CommandError;

/// Command handler function type
pub type CommandHandler =
    Arc<dyn Fn(&BotContext, &Interaction) -> Result<String, CommandError> + Send + Sync>;

/// Command as the remote platform sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<serde_json::Value>,
}

impl CommandDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: Vec<serde_json::Value>) -> Self {
        self.options = options;
        self
    }
}

/// Name-keyed command table that remembers registration order.
///
/// Re-registering a name replaces the earlier command in place, so the
/// position of the first registration is kept.
#[derive(Debug, Default)]
pub struct CommandTable {
    commands: Vec<CommandModule>,
    index: HashMap<String, usize>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a command, returning the one it replaced
    pub fn insert(&mut self, command: CommandModule) -> Option<CommandModule> {
        match self.index.get(command.name()) {
            Some(&slot) => Some(std::mem::replace(&mut self.commands[slot], command)),
            None => {
                self.index.insert(command.name().to_string(), self.commands.len());
                self.commands.push(command);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandModule> {
        self.index.get(name).map(|&slot| &self.commands[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Commands in registration order
    pub fn iter(&self) -> impl Iterator<Item = &CommandModule> {
        self.commands.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
