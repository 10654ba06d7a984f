//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Data: JSON data directory
//! - Modules: Module files on disk
//! - Adapters: Platform connections (Discord, console)

pub mod config;
pub mod data;
pub mod modules;
pub mod adapters;
