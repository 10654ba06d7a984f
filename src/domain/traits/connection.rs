use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::errors::BotError;
use crate::domain::entities::{CommandDefinition, GatewayEvent, Interaction, Presence};

/// Identifier reserved for the application-wide scope
pub const GLOBAL_SCOPE_ID: &str = "0";

/// Remote registration boundary: the global scope or a single server
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(String);

impl ScopeId {
    pub fn global() -> Self {
        Self(GLOBAL_SCOPE_ID.to_string())
    }

    pub fn guild(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn is_global(&self) -> bool {
        self.0 == GLOBAL_SCOPE_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_global() {
            f.write_str("global")
        } else {
            write!(f, "guild {}", self.0)
        }
    }
}

/// Live link to the chat platform
#[async_trait]
pub trait Connection: Send + Sync {
    /// Log in and start delivering events.
    ///
    /// `GatewayEvent::Ready` is sent once the remote API can be called.
    async fn login(&mut self) -> Result<mpsc::Receiver<GatewayEvent>, BotError>;

    /// Make the remote command list of `scope` exactly `commands`.
    ///
    /// Returns how many commands the platform acknowledged.
    async fn set_commands(
        &self,
        scope: &ScopeId,
        commands: &[CommandDefinition],
    ) -> Result<usize, BotError>;

    /// Answer an interaction with a text message
    async fn reply(&self, interaction: &Interaction, text: &str) -> Result<(), BotError>;

    async fn set_presence(&self, _presence: &Presence) -> Result<(), BotError> {
        Ok(())
    }

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone, PartialEq)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}

impl BotInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            username: username.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_display() {
        assert_eq!(ScopeId::global().to_string(), "global");
        assert_eq!(ScopeId::guild("111").to_string(), "guild 111");
        assert!(ScopeId::guild(GLOBAL_SCOPE_ID).is_global());
    }
}
