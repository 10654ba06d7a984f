//! JSON data directory loading

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::application::errors::DataError;
use crate::domain::entities::{BotData, CONFIG_SLOT};

/// Flat directory of `*.json` files, one per data slot
pub struct DataStore {
    base_path: PathBuf,
}

impl DataStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Build the bot data from the default configuration and the data files.
    ///
    /// `config.json` is merged over the defaults one top-level key at a time,
    /// every other file becomes a slot named after the file.
    pub async fn load(&self) -> Result<BotData, DataError> {
        let mut data = BotData::new();

        if !tokio::fs::try_exists(&self.base_path).await? {
            tracing::warn!("Data directory does not exist: {}", self.base_path.display());
            return Ok(data);
        }

        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.base_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            files.push(path);
        }
        // config.json first
        files.sort_by_key(|p| slot_name(p).as_deref() != Some(CONFIG_SLOT));

        for path in files {
            let Some(name) = slot_name(&path) else {
                continue;
            };

            let content = tokio::fs::read_to_string(&path).await?;
            let value: Value = serde_json::from_str(&content).map_err(|e| DataError::Parse {
                path: path.clone(),
                reason: e.to_string(),
            })?;

            if is_empty_value(&value) {
                tracing::debug!("Skipping empty data file: {}", path.display());
                continue;
            }

            if name == CONFIG_SLOT {
                let Value::Object(overrides) = value else {
                    return Err(DataError::Parse {
                        path,
                        reason: "config must be a JSON object".to_string(),
                    });
                };
                data.merge_config(overrides);
            } else {
                data.set_slot(name, value);
            }
        }

        Ok(data)
    }
}

/// `null`, `false`, zero and `""` carry no data
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn slot_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
