//! Path indexer - Finds module files below a root directory

use std::path::{Component, Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::domain::entities::ModuleKind;

/// File extensions a module file may use
const MODULE_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Lists files below a root directory
pub struct PathIndexer {
    root: PathBuf,
    recursive: bool,
}

impl PathIndexer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: true,
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All files below the root, in no particular order.
    ///
    /// Directory symlinks are not followed; symlinks to files are kept.
    pub fn discover(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        if !self.root.is_dir() {
            tracing::warn!("Module directory does not exist: {}", self.root.display());
            return files;
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(&self.root)
            .max_depth(max_depth)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
                files.push(entry.into_path());
            }
        }

        files
    }

    /// Files that sit under a `commands` or `events` directory
    pub fn module_paths(&self) -> Vec<PathBuf> {
        self.discover()
            .into_iter()
            .filter(|path| module_family(&self.root, path).is_some())
            .collect()
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Family marker found in `path`, relative to `root`
pub fn module_family(root: &Path, path: &Path) -> Option<ModuleKind> {
    let extension = path.extension().and_then(|e| e.to_str())?;
    if !MODULE_EXTENSIONS.contains(&extension.to_lowercase().as_str()) {
        return None;
    }

    let relative = path.strip_prefix(root).unwrap_or(path);
    let parent = relative.parent()?;
    parent.components().find_map(|component| match component {
        Component::Normal(segment) => ModuleKind::ALL
            .into_iter()
            .find(|kind| segment.to_str() == Some(kind.family_dir())),
        _ => None,
    })
}

/// Path shown in reports: relative to the root when possible
pub fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
