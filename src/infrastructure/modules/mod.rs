//! Module files on disk
//! 
//! Modules are YAML (or JSON) manifests placed under a `commands` or `events`
//! directory somewhere below the bot root. Each manifest names the handler it runs.

pub mod indexer;
pub mod loader;
pub mod manifest;

pub use indexer::{display_path, module_family, PathIndexer};
pub use loader::ModuleLoader;
pub use manifest::ModuleManifest;
