//! Module manifest definition

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::application::errors::ModuleError;

/// Raw contents of a module file, before validation.
///
/// Every field is optional here; the validator decides what is missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleManifest {
    /// Module family tag (`command` or `event`)
    pub module: Option<String>,

    /// Command name, or the platform event to listen to
    pub name: Option<String>,

    /// Command description shown by the platform
    pub description: Option<String>,

    /// Deployment tag (`global`, `dev` or `support`)
    pub deployment: Option<String>,

    /// Key of the handler to run
    pub execute: Option<String>,

    /// Command options, forwarded as-is to the platform
    #[serde(default)]
    pub options: Vec<serde_json::Value>,
}

impl ModuleManifest {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModuleError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ModuleError::Load {
            path: path.to_path_buf(),
            reason: format!("Failed to read module: {}", e),
        })?;

        Self::parse(&content).map_err(|reason| ModuleError::Load {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parse YAML (or JSON, which YAML accepts) module contents
    pub fn parse(content: &str) -> Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| format!("Failed to parse module: {}", e))
    }
}
