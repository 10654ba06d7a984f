//! Domain layer - Core bot model with no I/O
//! 
//! This layer contains:
//! - Entities: Modules, commands, events, the command table and the bot context
//! - Traits: Abstractions for infrastructure (Connection)

pub mod entities;
pub mod traits;
