//! Runtime - Discovery, login and the event loop

use std::path::PathBuf;

use super::discovery::{Discovered, Discovery, EventSubscription};
use super::handlers::HandlerCatalog;
use super::reconciler::{self, ReconcileReport};
use super::report::log_report;
use crate::application::errors::{BotError, CommandError};
use crate::application::messaging::EventBus;
use crate::domain::entities::{BotContext, DiscoveryReport, GatewayEvent, Interaction, Presence, ReadyInfo};
use crate::domain::traits::Connection;
use crate::infrastructure::config::Config;
use crate::infrastructure::data::DataStore;
use crate::infrastructure::modules::PathIndexer;

/// Activity shown once the bot is online
const ACTIVITY: &str = "Operating ...";
const ACTIVITY_URL: &str = "https://github.com/DisQada/halfbot";

/// Where the runtime finds its modules and data
#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    pub root: PathBuf,
    pub data: PathBuf,
    pub recursive: bool,
}

impl RuntimeOptions {
    pub fn new(root: impl Into<PathBuf>, data: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            data: data.into(),
            recursive: true,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.directories.root.clone(),
            data: config.directories.data.clone(),
            recursive: config.bot.recursive,
        }
    }
}

/// State built before login
pub struct Prepared {
    pub context: BotContext,
    pub events: EventBus,
    pub subscriptions: Vec<EventSubscription>,
    pub report: DiscoveryReport,
}

/// Load the data directory, then run discovery.
///
/// Nothing here touches the network.
pub async fn prepare(catalog: &HandlerCatalog, options: &RuntimeOptions) -> Result<Prepared, BotError> {
    let data = DataStore::new(&options.data).load().await?;

    let indexer = PathIndexer::new(&options.root).recursive(options.recursive);
    let Discovered {
        commands,
        events,
        subscriptions,
        report,
    } = Discovery::new(catalog).run(&indexer);

    Ok(Prepared {
        context: BotContext::new(data, commands),
        events,
        subscriptions,
        report,
    })
}

/// What a finished run leaves behind
pub struct RunSummary {
    pub context: BotContext,
    pub report: DiscoveryReport,
    pub reconcile: ReconcileReport,
}

/// A bot: a connection plus the handlers its modules can use
pub struct Runtime<C: Connection> {
    connection: C,
    catalog: HandlerCatalog,
    options: RuntimeOptions,
}

impl<C: Connection> Runtime<C> {
    pub fn new(connection: C, catalog: HandlerCatalog, options: RuntimeOptions) -> Self {
        Self {
            connection,
            catalog,
            options,
        }
    }

    /// Discover modules, log in and process events until the connection closes
    pub async fn run(mut self) -> Result<RunSummary, BotError> {
        let Prepared {
            context,
            events,
            report,
            ..
        } = prepare(&self.catalog, &self.options).await?;
        log_report(&report);

        let mut receiver = self.connection.login().await?;

        let mut session = Session {
            connection: &self.connection,
            context: &context,
            events: &events,
            reconciled: None,
        };
        while let Some(event) = receiver.recv().await {
            session.handle(event).await;
        }

        let reconcile = session.reconciled.take().ok_or(BotError::Disconnected)?;
        tracing::info!("Connection closed");

        Ok(RunSummary {
            context,
            report,
            reconcile,
        })
    }
}

struct Session<'a, C: Connection + ?Sized> {
    connection: &'a C,
    context: &'a BotContext,
    events: &'a EventBus,
    reconciled: Option<ReconcileReport>,
}

impl<C: Connection + ?Sized> Session<'_, C> {
    async fn handle(&mut self, event: GatewayEvent) {
        match event {
            GatewayEvent::Ready(info) => self.on_ready(info).await,
            GatewayEvent::Dispatch { name, args } => {
                self.events.emit(self.context, &name, &args);
            }
            GatewayEvent::Interaction(interaction) => self.on_interaction(interaction).await,
        }
    }

    async fn on_ready(&mut self, info: ReadyInfo) {
        if self.reconciled.is_some() {
            tracing::debug!("Ignoring repeated ready signal");
            return;
        }

        let config = self.context.data.deployment_config();
        let report = reconciler::reconcile(self.connection, &self.context.commands, &config).await;
        if !report.is_success() {
            tracing::warn!("{} scope(s) failed to register", report.failed().count());
        }
        self.reconciled = Some(report);

        tracing::info!(
            "The bot \"{}\" is online (connected at {})",
            info.user.username,
            info.connected_at.to_rfc3339()
        );

        let presence = Presence::online(ACTIVITY).with_url(ACTIVITY_URL);
        if let Err(e) = self.connection.set_presence(&presence).await {
            tracing::warn!("Failed to set presence: {}", e);
        }
    }

    async fn on_interaction(&self, interaction: Interaction) {
        let reply = match self.context.commands.get(&interaction.command) {
            Some(command) => match (command.handler)(self.context, &interaction) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("Command '{}' failed: {}", interaction.command, e);
                    format!("Error: {}", e)
                }
            },
            None => {
                tracing::warn!("Interaction for unknown command '{}'", interaction.command);
                CommandError::NotFound(interaction.command.clone()).to_string()
            }
        };

        if let Err(e) = self.connection.reply(&interaction, &reply).await {
            tracing::error!("Failed to reply to /{}: {}", interaction.command, e);
        }
    }
}
