//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub directories: DirectoriesConfig,
    pub discord: DiscordConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    /// Scan the module root recursively
    pub recursive: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DirectoriesConfig {
    /// Folder containing the `commands` and `events` modules
    pub root: PathBuf,
    /// Folder containing the JSON data files
    pub data: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DiscordConfig {
    pub token: Option<String>,
    pub application_id: Option<String>,
    pub api_base: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "halfbot".to_string(),
            recursive: true,
        }
    }
}

impl Default for DirectoriesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("bot"),
            data: PathBuf::from("bot/data"),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: None,
            application_id: None,
            api_base: "https://discord.com/api/v10".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config.apply_env())
    }

    /// Load `path` if it exists, otherwise start from defaults and the environment.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn resolve(path: impl Into<PathBuf>, token: Option<String>) -> Result<Self, ConfigError> {
        let path = path.into();
        let mut config = if path.exists() {
            Config::load(path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Config::load_env()
        };

        if let Some(token) = token {
            config.discord.token = Some(token);
        }

        Ok(config)
    }

    pub fn load_env() -> Self {
        Config::default().apply_env()
    }

    /// Overlay environment variables on top of this config
    pub fn apply_env(mut self) -> Self {
        if let Ok(token) = std::env::var("BOT_TOKEN") {
            self.discord.token = Some(token);
        }

        if let Ok(id) = std::env::var("BOT_APPLICATION_ID") {
            self.discord.application_id = Some(id);
        }

        if let Ok(root) = std::env::var("BOT_ROOT_DIR") {
            self.directories.root = PathBuf::from(root);
        }

        if let Ok(data) = std::env::var("BOT_DATA_DIR") {
            self.directories.data = PathBuf::from(data);
        }

        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.name.trim().is_empty() {
            return Err(ConfigError::MissingField("bot.name".to_string()));
        }
        if !self.discord.api_base.starts_with("http") {
            return Err(ConfigError::InvalidValue(format!(
                "discord.api-base must be an http(s) URL, got '{}'",
                self.discord.api_base
            )));
        }
        Ok(())
    }

    /// Token to log in with, ignoring blank values
    pub fn token(&self) -> Option<&str> {
        self.discord
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
