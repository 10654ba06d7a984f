//! Discord adapter

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::application::errors::BotError;
use crate::domain::entities::{CommandDefinition, GatewayEvent, Interaction, ReadyInfo};
use crate::domain::traits::{BotInfo, Connection, ScopeId};
use crate::infrastructure::config::DiscordConfig;

/// Interaction callback type for a message reply
const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;

/// Capacity of the event channel between the gateway and the runtime
const EVENT_BUFFER: usize = 256;

/// Discord connection over the REST API.
///
/// The websocket gateway is not part of this adapter: whatever drives it
/// takes [`DiscordConnection::event_sender`] before the runtime starts and
/// pushes interactions and dispatches through it.
pub struct DiscordConnection {
    token: String,
    api_base: String,
    application_id: Option<String>,
    client: Client,
    info: BotInfo,
    sender: mpsc::Sender<GatewayEvent>,
    receiver: Option<mpsc::Receiver<GatewayEvent>>,
}

impl DiscordConnection {
    pub fn new(token: impl Into<String>, config: &DiscordConfig) -> Self {
        let (sender, receiver) = mpsc::channel(EVENT_BUFFER);
        Self {
            token: token.into(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            application_id: config.application_id.clone(),
            client: Client::new(),
            info: BotInfo::new("unknown", "halfbot", "halfbot"),
            sender,
            receiver: Some(receiver),
        }
    }

    /// Get the API URL for a path
    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("Authorization", format!("Bot {}", self.token))
    }

    /// Sender for events coming from the gateway
    pub fn event_sender(&self) -> mpsc::Sender<GatewayEvent> {
        self.sender.clone()
    }

    /// Hand the event stream to the runtime, starting with the ready signal
    async fn open_events(&mut self) -> Result<mpsc::Receiver<GatewayEvent>, BotError> {
        let receiver = self
            .receiver
            .take()
            .ok_or_else(|| BotError::Internal("Discord connection already logged in".to_string()))?;

        self.sender
            .send(GatewayEvent::Ready(ReadyInfo::new(self.info.clone())))
            .await
            .map_err(|_| BotError::Disconnected)?;

        Ok(receiver)
    }

    /// URL of the command list for a scope
    pub fn commands_url(&self, application_id: &str, scope: &ScopeId) -> String {
        if scope.is_global() {
            self.api_url(&format!("applications/{}/commands", application_id))
        } else {
            self.api_url(&format!(
                "applications/{}/guilds/{}/commands",
                application_id,
                scope.as_str()
            ))
        }
    }

    /// Fetch bot info from the Discord API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct CurrentUser {
            id: String,
            username: String,
            global_name: Option<String>,
        }

        let response = self
            .authorized(self.client.get(self.api_url("users/@me")))
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let user: CurrentUser = check(response)
            .await?
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        self.info = BotInfo {
            id: user.id,
            name: user.global_name.unwrap_or_else(|| user.username.clone()),
            username: user.username,
        };

        Ok(())
    }

    async fn fetch_application_id(&self) -> Result<String, BotError> {
        #[derive(Deserialize)]
        struct Application {
            id: String,
        }

        let response = self
            .authorized(self.client.get(self.api_url("oauth2/applications/@me")))
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let application: Application = check(response)
            .await?
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(application.id)
    }
}

/// Map error statuses to bot errors
async fn check(response: Response) -> Result<Response, BotError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(BotError::Auth(format!("Discord API error {}: {}", status, body)))
        }
        _ => Err(BotError::Network(format!("Discord API error {}: {}", status, body))),
    }
}

#[async_trait]
impl Connection for DiscordConnection {
    async fn login(&mut self) -> Result<mpsc::Receiver<GatewayEvent>, BotError> {
        self.fetch_bot_info().await?;

        if self.application_id.is_none() {
            self.application_id = Some(self.fetch_application_id().await?);
        }

        self.open_events().await
    }

    async fn set_commands(
        &self,
        scope: &ScopeId,
        commands: &[CommandDefinition],
    ) -> Result<usize, BotError> {
        let application_id = self
            .application_id
            .as_deref()
            .ok_or_else(|| BotError::Internal("set_commands called before login".to_string()))?;

        let response = self
            .authorized(self.client.put(self.commands_url(application_id, scope)))
            .json(commands)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let registered: Vec<serde_json::Value> = check(response)
            .await?
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(registered.len())
    }

    async fn reply(&self, interaction: &Interaction, text: &str) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct MessageData<'a> {
            content: &'a str,
        }

        #[derive(Serialize)]
        struct Callback<'a> {
            #[serde(rename = "type")]
            kind: u8,
            data: MessageData<'a>,
        }

        let url = self.api_url(&format!(
            "interactions/{}/{}/callback",
            interaction.id, interaction.token
        ));
        let body = Callback {
            kind: CHANNEL_MESSAGE_WITH_SOURCE,
            data: MessageData { content: text },
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        check(response).await?;
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
