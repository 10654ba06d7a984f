//! halfbot - a small chat-bot runtime built from module files on disk
//!
//! Command and event modules are discovered under a root directory, checked
//! against a catalog of handlers and registered before login. Once the
//! connection is ready, every remote command scope is replaced with the
//! commands declared locally.

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use application::errors::BotError;
pub use application::services::{HandlerCatalog, Runtime, RuntimeOptions};
pub use domain::traits::Connection;
