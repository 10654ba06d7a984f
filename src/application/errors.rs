//! Application layer errors

use std::path::PathBuf;
use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Module error: {0}")]
    Module(#[from] ModuleError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Connection closed before the bot became ready")]
    Disconnected,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while turning a file on disk into a registered module
#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("Failed to load {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    #[error("Invalid module {}: {reason}", .path.display())]
    Validation { path: PathBuf, reason: String },

    #[error("Unknown deployment value: {0}")]
    UnknownDeployment(String),
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    NotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// Data directory errors
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
