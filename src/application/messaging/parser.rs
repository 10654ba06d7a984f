//! Input parser - Turns console lines into gateway events

use serde_json::Value;
use uuid::Uuid;

use crate::application::errors::BotError;
use crate::domain::entities::{GatewayEvent, Interaction};

/// Parses typed lines into interactions (`/name args`) or events (`!name json...`)
pub struct InputParser {
    command_prefix: String,
    event_prefix: String,
}

impl Default for InputParser {
    fn default() -> Self {
        Self::new("/", "!")
    }
}

impl InputParser {
    pub fn new(command_prefix: impl Into<String>, event_prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: command_prefix.into(),
            event_prefix: event_prefix.into(),
        }
    }

    /// Parse one line; `Ok(None)` means there was nothing to send
    pub fn parse(&self, line: &str, user_id: &str) -> Result<Option<GatewayEvent>, BotError> {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix(self.command_prefix.as_str()) {
            return Ok(self.parse_command(rest, user_id).map(GatewayEvent::Interaction));
        }

        if let Some(rest) = line.strip_prefix(self.event_prefix.as_str()) {
            return self.parse_event(rest);
        }

        Ok(None)
    }

    fn parse_command(&self, text: &str, user_id: &str) -> Option<Interaction> {
        let mut parts = text.split_whitespace();
        let name = parts.next()?;
        let args = parts.map(|s| s.to_string()).collect();

        Some(
            Interaction::new(Uuid::new_v4().to_string(), name)
                .with_args(args)
                .with_user(user_id),
        )
    }

    /// `name` followed by zero or more whitespace-separated JSON values
    fn parse_event(&self, text: &str) -> Result<Option<GatewayEvent>, BotError> {
        let text = text.trim_start();
        let (name, rest) = match text.find(char::is_whitespace) {
            Some(at) => text.split_at(at),
            None => (text, ""),
        };
        if name.is_empty() {
            return Ok(None);
        }

        let args = serde_json::Deserializer::from_str(rest)
            .into_iter::<Value>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| BotError::Parse(format!("Invalid event arguments: {}", e)))?;

        Ok(Some(GatewayEvent::Dispatch {
            name: name.to_string(),
            args,
        }))
    }
}
