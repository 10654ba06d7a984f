//! Handler catalog - the code module files point at with `execute`

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::errors::CommandError;
use crate::domain::entities::{BotContext, CommandHandler, EventHandler, Interaction};

/// Named command and event handlers that module files can reference
#[derive(Clone, Default)]
pub struct HandlerCatalog {
    commands: HashMap<String, CommandHandler>,
    events: HashMap<String, EventHandler>,
}

impl HandlerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the built-in handlers registered
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        catalog.register_command("ping", |_, _| Ok("Pong!".to_string()));

        catalog.register_command("help", |ctx, _| {
            let mut help = "Available commands:\n".to_string();
            for cmd in ctx.commands.iter() {
                help.push_str(&format!("  /{} - {}\n", cmd.name(), cmd.definition.description));
            }
            Ok(help)
        });

        catalog.register_command("about", |ctx, _| {
            let brand = ctx.data.brand();
            let name = brand.name.unwrap_or_else(|| "halfbot".to_string());
            Ok(format!("{} v{} with {} command(s)", name, env!("CARGO_PKG_VERSION"), ctx.commands.len()))
        });

        catalog.register_command("echo", |_, interaction: &Interaction| {
            if interaction.args.is_empty() {
                return Err(CommandError::InvalidArgs("nothing to echo".to_string()));
            }
            Ok(interaction.args.join(" "))
        });

        catalog.register_event("log", |_, args| {
            tracing::info!("Event received with {} argument(s): {:?}", args.len(), args);
            Ok(())
        });

        catalog
    }

    pub fn register_command<F>(&mut self, key: impl Into<String>, handler: F)
    where
        F: Fn(&BotContext, &Interaction) -> Result<String, CommandError> + Send + Sync + 'static,
    {
        self.commands.insert(key.into(), Arc::new(handler));
    }

    pub fn register_event<F>(&mut self, key: impl Into<String>, handler: F)
    where
        F: Fn(&BotContext, &[serde_json::Value]) -> Result<(), CommandError> + Send + Sync + 'static,
    {
        self.events.insert(key.into(), Arc::new(handler));
    }

    pub fn with_command<F>(mut self, key: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&BotContext, &Interaction) -> Result<String, CommandError> + Send + Sync + 'static,
    {
        self.register_command(key, handler);
        self
    }

    pub fn with_event<F>(mut self, key: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&BotContext, &[serde_json::Value]) -> Result<(), CommandError> + Send + Sync + 'static,
    {
        self.register_event(key, handler);
        self
    }

    pub fn command(&self, key: &str) -> Option<CommandHandler> {
        self.commands.get(key).cloned()
    }

    pub fn event(&self, key: &str) -> Option<EventHandler> {
        self.events.get(key).cloned()
    }
}
