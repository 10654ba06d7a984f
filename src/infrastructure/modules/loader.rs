//! Module loader - Reads module files, once per path

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::manifest::ModuleManifest;
use crate::application::errors::ModuleError;

/// Loads module manifests from disk.
///
/// A path is read at most once; later loads of the same file return the
/// cached manifest even if the file changed on disk.
#[derive(Debug, Default)]
pub struct ModuleLoader {
    cache: HashMap<PathBuf, Arc<ModuleManifest>>,
}

impl ModuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a single module file
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Arc<ModuleManifest>, ModuleError> {
        let path = path.as_ref();
        let key = path.canonicalize().map_err(|e| ModuleError::Load {
            path: path.to_path_buf(),
            reason: format!("Failed to resolve path: {}", e),
        })?;

        if let Some(manifest) = self.cache.get(&key) {
            tracing::debug!("Module already loaded: {}", path.display());
            return Ok(Arc::clone(manifest));
        }

        let manifest = Arc::new(ModuleManifest::from_file(&key)?);
        self.cache.insert(key, Arc::clone(&manifest));

        Ok(manifest)
    }

    /// Number of distinct files loaded so far
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
