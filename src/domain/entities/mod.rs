//! Domain entities - Modules, commands, events and the bot context

pub mod command;
pub mod context;
pub mod event;
pub mod module;
pub mod outcome;

pub use command::{CommandDefinition, CommandHandler, CommandTable};
pub use context::{BotContext, BotData, Brand, DeploymentConfig, CONFIG_SLOT};
pub use event::{EventHandler, GatewayEvent, Interaction, Presence, ReadyInfo};
pub use module::{CommandModule, Deployment, EventModule, LoadedModule, ModuleKind};
pub use outcome::{DiscoveryReport, RecordStatus, RegistrationOutcome};
