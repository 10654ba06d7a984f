//! Console connection for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::application::errors::BotError;
use crate::application::messaging::InputParser;
use crate::domain::entities::{CommandDefinition, GatewayEvent, Interaction, Presence, ReadyInfo};
use crate::domain::traits::{BotInfo, Connection, ScopeId};

/// Local user id attached to console interactions
const CONSOLE_USER: &str = "console";

/// Console connection: stdin in, stdout out
pub struct ConsoleConnection {
    info: BotInfo,
}

impl ConsoleConnection {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            info: BotInfo::new("console", name.clone(), name),
        }
    }
}

impl Default for ConsoleConnection {
    fn default() -> Self {
        Self::new("halfbot")
    }
}

#[async_trait]
impl Connection for ConsoleConnection {
    async fn login(&mut self) -> Result<mpsc::Receiver<GatewayEvent>, BotError> {
        tracing::info!("Starting console bot (dev mode)");
        let (tx, rx) = mpsc::channel(64);

        tx.send(GatewayEvent::Ready(ReadyInfo::new(self.info.clone())))
            .await
            .map_err(|_| BotError::Disconnected)?;

        tokio::spawn(async move {
            let parser = InputParser::default();
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            println!("Type /command [args], !event [json...] or quit");

            loop {
                let line = match lines.next_line().await {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!("Failed to read stdin: {}", e);
                        break;
                    }
                };

                if matches!(line.trim(), "quit" | "exit") {
                    break;
                }

                match parser.parse(&line, CONSOLE_USER) {
                    Ok(Some(event)) => {
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => println!("[BOT] Unrecognised input, try /help"),
                    Err(e) => println!("[BOT] {}", e),
                }
            }
        });

        Ok(rx)
    }

    async fn set_commands(
        &self,
        scope: &ScopeId,
        commands: &[CommandDefinition],
    ) -> Result<usize, BotError> {
        let names: Vec<&str> = commands.iter().map(|c| c.name.as_str()).collect();
        println!("[BOT] {} commands: {}", scope, names.join(", "));
        Ok(commands.len())
    }

    async fn reply(&self, _interaction: &Interaction, text: &str) -> Result<(), BotError> {
        println!("[BOT] {}", text);
        Ok(())
    }

    async fn set_presence(&self, presence: &Presence) -> Result<(), BotError> {
        tracing::debug!("Presence: {} {:?}", presence.status, presence.activity);
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
