use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::CommandTable;

/// Name of the data slot that is merged into the configuration
pub const CONFIG_SLOT: &str = "config";

/// Server identifiers commands can be deployed to
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeploymentConfig {
    pub dev: Option<String>,
    pub support: Option<String>,
}

/// Branding used by built-in replies
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub name: Option<String>,
    pub colour: Option<u32>,
    pub logo_url: Option<String>,
}

/// Shared data mapping: the bot configuration plus one value per data file
#[derive(Debug, Clone)]
pub struct BotData {
    config: Map<String, Value>,
    slots: HashMap<String, Value>,
}

impl Default for BotData {
    fn default() -> Self {
        let config = match default_config() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            config,
            slots: HashMap::new(),
        }
    }
}

fn default_config() -> Value {
    json!({
        "id": {
            "guild": {}
        },
        "brand": {
            "name": "halfbot",
            "colour": 0xffffff,
            "logoUrl": "https://cdn.discordapp.com/embed/avatars/0.png"
        }
    })
}

impl BotData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge top-level keys over the configuration.
    ///
    /// Nested objects are replaced as a whole, never merged key by key.
    pub fn merge_config(&mut self, overrides: Map<String, Value>) {
        for (key, value) in overrides {
            self.config.insert(key, value);
        }
    }

    pub fn set_slot(&mut self, name: impl Into<String>, value: Value) {
        self.slots.insert(name.into(), value);
    }

    pub fn slot(&self, name: &str) -> Option<&Value> {
        self.slots.get(name)
    }

    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    /// Configured server identifiers under `id.guild`.
    ///
    /// Ids may be strings or numbers; any other value is ignored with a warning.
    pub fn deployment_config(&self) -> DeploymentConfig {
        let guild = self.config.get("id").and_then(|id| id.get("guild"));
        DeploymentConfig {
            dev: guild.and_then(|g| server_id(g, "dev")),
            support: guild.and_then(|g| server_id(g, "support")),
        }
    }

    pub fn brand(&self) -> Brand {
        self.config
            .get("brand")
            .and_then(|brand| serde_json::from_value(brand.clone()).ok())
            .unwrap_or_default()
    }
}

fn server_id(guild: &Value, key: &str) -> Option<String> {
    match guild.get(key)? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        Value::Null => None,
        other => {
            tracing::warn!("Ignoring id.guild.{}: expected a server id, got {}", key, other);
            None
        }
    }
}

/// Read-only context handed to handlers and to reconciliation
#[derive(Debug, Default)]
pub struct BotContext {
    pub data: BotData,
    pub commands: CommandTable,
}

impl BotContext {
    pub fn new(data: BotData, commands: CommandTable) -> Self {
        Self { data, commands }
    }
}
