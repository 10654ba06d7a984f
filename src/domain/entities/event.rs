use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::BotContext;
use crate::application::errors::CommandError;
use crate::domain::traits::BotInfo;

/// Event handler function type.
///
/// Receives the bot context first, then the native arguments of the event.
pub type EventHandler =
    Arc<dyn Fn(&BotContext, &[serde_json::Value]) -> Result<(), CommandError> + Send + Sync>;

/// A command invocation coming from the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    /// Token used to answer the interaction
    pub token: String,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    pub user_id: Option<String>,
    pub channel_id: Option<String>,
}

impl Interaction {
    pub fn new(id: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token: String::new(),
            command: command.into(),
            args: Vec::new(),
            user_id: None,
            channel_id: None,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Payload of the ready signal
#[derive(Debug, Clone)]
pub struct ReadyInfo {
    pub user: BotInfo,
    pub connected_at: DateTime<Utc>,
}

impl ReadyInfo {
    pub fn new(user: BotInfo) -> Self {
        Self {
            user,
            connected_at: Utc::now(),
        }
    }
}

/// Everything a connection can deliver to the runtime
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    /// The connection is logged in and can take remote calls
    Ready(ReadyInfo),
    /// A named platform event with its native arguments
    Dispatch {
        name: String,
        args: Vec<serde_json::Value>,
    },
    Interaction(Interaction),
}

/// Presence shown next to the bot user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presence {
    pub status: String,
    pub activity: Option<String>,
    pub url: Option<String>,
}

impl Presence {
    pub fn online(activity: impl Into<String>) -> Self {
        Self {
            status: "online".to_string(),
            activity: Some(activity.into()),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}
