use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::command::{CommandDefinition, CommandHandler};
use super::event::EventHandler;
use crate::application::errors::ModuleError;

/// Family a module file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Command,
    Event,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 2] = [ModuleKind::Command, ModuleKind::Event];

    /// Tag used inside a module file (`module: command`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Command => "command",
            ModuleKind::Event => "event",
        }
    }

    /// Directory name marking files of this family
    pub fn family_dir(&self) -> &'static str {
        match self {
            ModuleKind::Command => "commands",
            ModuleKind::Event => "events",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a command is meant to be visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    /// Every server the application is in
    Global,
    /// The configured development server
    Dev,
    /// The configured support server
    Support,
}

impl Deployment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Deployment::Global => "global",
            Deployment::Dev => "dev",
            Deployment::Support => "support",
        }
    }
}

impl fmt::Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Deployment {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "global" => Ok(Deployment::Global),
            "dev" => Ok(Deployment::Dev),
            "support" => Ok(Deployment::Support),
            other => Err(ModuleError::UnknownDeployment(other.to_string())),
        }
    }
}

/// A validated command module
#[derive(Clone)]
pub struct CommandModule {
    pub path: PathBuf,
    pub definition: CommandDefinition,
    pub deployment: Deployment,
    pub handler: CommandHandler,
}

impl CommandModule {
    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

impl fmt::Debug for CommandModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandModule")
            .field("path", &self.path)
            .field("definition", &self.definition)
            .field("deployment", &self.deployment)
            .finish_non_exhaustive()
    }
}

/// A validated event module
#[derive(Clone)]
pub struct EventModule {
    pub path: PathBuf,
    pub name: String,
    pub handler: EventHandler,
}

impl fmt::Debug for EventModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventModule")
            .field("path", &self.path)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A module that passed validation, ready for registration
#[derive(Debug, Clone)]
pub enum LoadedModule {
    Command(CommandModule),
    Event(EventModule),
}

impl LoadedModule {
    pub fn kind(&self) -> ModuleKind {
        match self {
            LoadedModule::Command(_) => ModuleKind::Command,
            LoadedModule::Event(_) => ModuleKind::Event,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LoadedModule::Command(c) => c.name(),
            LoadedModule::Event(e) => &e.name,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            LoadedModule::Command(c) => &c.path,
            LoadedModule::Event(e) => &e.path,
        }
    }
}
