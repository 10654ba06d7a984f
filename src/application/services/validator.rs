//! Module validation - turns a raw manifest into a typed module

use std::path::Path;

use super::handlers::HandlerCatalog;
use crate::application::errors::ModuleError;
use crate::domain::entities::{
    CommandDefinition, CommandModule, Deployment, EventModule, LoadedModule, ModuleKind,
};
use crate::infrastructure::modules::ModuleManifest;

/// Description used when a command file does not provide one
const DEFAULT_DESCRIPTION: &str = "No description";

/// Checks the shape of module manifests against the handler catalog
pub struct ModuleValidator<'a> {
    catalog: &'a HandlerCatalog,
}

impl<'a> ModuleValidator<'a> {
    pub fn new(catalog: &'a HandlerCatalog) -> Self {
        Self { catalog }
    }

    /// Validate a manifest, reporting every missing or invalid field at once
    pub fn validate(&self, path: &Path, manifest: &ModuleManifest) -> Result<LoadedModule, ModuleError> {
        let invalid = |reason: String| ModuleError::Validation {
            path: path.to_path_buf(),
            reason,
        };

        let kind = match manifest.module.as_deref().map(str::trim) {
            Some("command") => ModuleKind::Command,
            Some("event") => ModuleKind::Event,
            Some(other) => return Err(invalid(format!("unknown module kind '{}'", other))),
            None => return Err(invalid("missing `module`".to_string())),
        };

        let mut problems = Vec::new();

        let name = manifest
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        if name.is_none() {
            problems.push("missing `name`".to_string());
        }

        let key = manifest.execute.as_deref().map(str::trim).filter(|k| !k.is_empty());

        match kind {
            ModuleKind::Command => {
                let deployment = match manifest.deployment.as_deref() {
                    Some(tag) => tag.parse::<Deployment>().map_err(|e| problems.push(e.to_string())).ok(),
                    None => {
                        problems.push("missing `deployment`".to_string());
                        None
                    }
                };

                let handler = match key {
                    Some(key) => {
                        let handler = self.catalog.command(key);
                        if handler.is_none() {
                            problems.push(format!("no command handler named '{}'", key));
                        }
                        handler
                    }
                    None => {
                        problems.push("missing `execute`".to_string());
                        None
                    }
                };

                match (name, deployment, handler) {
                    (Some(name), Some(deployment), Some(handler)) if problems.is_empty() => {
                        let description = manifest
                            .description
                            .as_deref()
                            .map(str::trim)
                            .filter(|d| !d.is_empty())
                            .unwrap_or(DEFAULT_DESCRIPTION);

                        Ok(LoadedModule::Command(CommandModule {
                            path: path.to_path_buf(),
                            definition: CommandDefinition::new(name, description)
                                .with_options(manifest.options.clone()),
                            deployment,
                            handler,
                        }))
                    }
                    _ => Err(invalid(problems.join("; "))),
                }
            }
            ModuleKind::Event => {
                let handler = match key {
                    Some(key) => {
                        let handler = self.catalog.event(key);
                        if handler.is_none() {
                            problems.push(format!("no event handler named '{}'", key));
                        }
                        handler
                    }
                    None => {
                        problems.push("missing `execute`".to_string());
                        None
                    }
                };

                match (name, handler) {
                    (Some(name), Some(handler)) if problems.is_empty() => {
                        Ok(LoadedModule::Event(EventModule {
                            path: path.to_path_buf(),
                            name: name.to_string(),
                            handler,
                        }))
                    }
                    _ => Err(invalid(problems.join("; "))),
                }
            }
        }
    }
}
