//! Registrar - Puts validated modules where the runtime can reach them

use crate::application::messaging::{EventBus, SubscriptionId};
use crate::domain::entities::{
    CommandModule, CommandTable, Deployment, EventModule, ModuleKind, RegistrationOutcome,
};

/// Owns the command table and the event subscriptions while discovery runs
#[derive(Default)]
pub struct Registrar {
    commands: CommandTable,
    events: EventBus,
}

impl Registrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command to the table; a command with the same name is replaced
    pub fn register_command(&mut self, command: CommandModule) -> RegistrationOutcome {
        let name = command.name().to_string();
        let deployment = command.deployment;
        let path = command.path.clone();

        if let Some(previous) = self.commands.insert(command) {
            tracing::warn!(
                "Command '{}' from {} replaces the one from {}",
                name,
                path.display(),
                previous.path.display()
            );
        }

        RegistrationOutcome::success(name, ModuleKind::Command, deployment)
    }

    /// Subscribe an event module to its platform event
    pub fn register_event(&mut self, event: EventModule) -> (RegistrationOutcome, SubscriptionId) {
        let id = self.events.subscribe(event.name.clone(), event.handler);
        let outcome = RegistrationOutcome::success(event.name, ModuleKind::Event, Deployment::Global);
        (outcome, id)
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn into_parts(self) -> (CommandTable, EventBus) {
        (self.commands, self.events)
    }
}
