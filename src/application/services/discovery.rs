//! Discovery - Index, load, validate and register every module under a root

use std::path::Path;

use super::handlers::HandlerCatalog;
use super::registrar::Registrar;
use super::validator::ModuleValidator;
use crate::application::errors::ModuleError;
use crate::application::messaging::{EventBus, SubscriptionId};
use crate::domain::entities::{CommandTable, DiscoveryReport, LoadedModule, RegistrationOutcome};
use crate::infrastructure::modules::{display_path, ModuleLoader, PathIndexer};

/// Handle of an event module subscribed during discovery
#[derive(Debug, Clone, PartialEq)]
pub struct EventSubscription {
    /// Platform event the module listens to
    pub event: String,
    /// Module file, relative to the root
    pub module: String,
    pub id: SubscriptionId,
}

/// What a discovery pass produced
pub struct Discovered {
    pub commands: CommandTable,
    pub events: EventBus,
    pub subscriptions: Vec<EventSubscription>,
    pub report: DiscoveryReport,
}

/// Runs the discovery phase against a handler catalog
pub struct Discovery<'a> {
    catalog: &'a HandlerCatalog,
    loader: ModuleLoader,
}

impl<'a> Discovery<'a> {
    pub fn new(catalog: &'a HandlerCatalog) -> Self {
        Self {
            catalog,
            loader: ModuleLoader::new(),
        }
    }

    /// Register every module found by `indexer`.
    ///
    /// A module that fails to load or validate is recorded as a failure and
    /// the scan moves on to the next file.
    pub fn run(&mut self, indexer: &PathIndexer) -> Discovered {
        let root = indexer.root();
        let mut paths = indexer.module_paths();
        // Registration order decides display order on the platform
        paths.sort();

        let mut registrar = Registrar::new();
        let mut report = DiscoveryReport::default();
        let mut subscriptions = Vec::new();

        for path in paths {
            let outcome = match self.load(&path) {
                Ok(module) => {
                    let (outcome, subscription) = classify(&mut registrar, module);
                    if let Some((event, id)) = subscription {
                        subscriptions.push(EventSubscription {
                            event,
                            module: display_path(root, &path),
                            id,
                        });
                    }
                    outcome
                }
                Err(e) => {
                    let relative = display_path(root, &path);
                    tracing::debug!("Skipping module {}: {}", relative, e);
                    RegistrationOutcome::fail(relative, failure_message(&e))
                }
            };
            report.record(outcome);
        }

        let (commands, events) = registrar.into_parts();
        Discovered {
            commands,
            events,
            subscriptions,
            report,
        }
    }

    fn load(&mut self, path: &Path) -> Result<LoadedModule, ModuleError> {
        let manifest = self.loader.load(path)?;
        ModuleValidator::new(self.catalog).validate(path, &manifest)
    }
}

/// Route a module to the registrar; events also hand back their subscription
fn classify(
    registrar: &mut Registrar,
    module: LoadedModule,
) -> (RegistrationOutcome, Option<(String, SubscriptionId)>) {
    match module {
        LoadedModule::Command(command) => (registrar.register_command(command), None),
        LoadedModule::Event(event) => {
            let name = event.name.clone();
            let (outcome, id) = registrar.register_event(event);
            (outcome, Some((name, id)))
        }
    }
}

fn failure_message(error: &ModuleError) -> String {
    match error {
        ModuleError::Load { reason, .. } => reason.clone(),
        ModuleError::Validation { reason, .. } => {
            format!("The module is invalid: {}", reason)
        }
        ModuleError::UnknownDeployment(_) => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{BotContext, Deployment, ModuleKind};
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_commands_and_events_are_registered() {
        let dir = TempDir::new().expect("create temp dir");
        write(dir.path(), "commands/ping.yaml", "module: command\nname: ping\ndeployment: global\nexecute: ping\n");
        write(dir.path(), "events/guild.yaml", "module: event\nname: guildCreate\nexecute: log\n");

        let catalog = HandlerCatalog::with_defaults();
        let found = Discovery::new(&catalog).run(&PathIndexer::new(dir.path()));

        assert_eq!(found.commands.names(), vec!["ping"]);
        assert_eq!(found.events.listener_count("guildCreate"), 1);
        assert_eq!(found.report.successes.len(), 2);
        assert!(!found.report.has_failures());

        let kinds: Vec<_> = found.report.successes.iter().map(|o| o.kind).collect();
        assert!(kinds.contains(&Some(ModuleKind::Event)));
        assert!(kinds.contains(&Some(ModuleKind::Command)));
    }

    #[test]
    fn test_failures_are_recorded_and_scan_continues() {
        let dir = TempDir::new().expect("create temp dir");
        write(dir.path(), "commands/a_broken.yaml", "module: [");
        write(dir.path(), "commands/b_incomplete.yaml", "module: command\nname: nope\ndeployment: global\n");
        write(dir.path(), "commands/c_ok.yaml", "module: command\nname: ok\ndeployment: support\nexecute: ping\n");

        let catalog = HandlerCatalog::with_defaults();
        let found = Discovery::new(&catalog).run(&PathIndexer::new(dir.path()));

        assert_eq!(found.commands.len(), 1);
        assert_eq!(found.report.successes[0].deployment, Some(Deployment::Support));
        assert_eq!(found.report.failures.len(), 2);

        let failure = &found.report.failures[1];
        assert_eq!(failure.identifier, "commands/b_incomplete.yaml");
        assert!(failure.message.as_deref().unwrap().contains("missing `execute`"));
        assert!(found.report.failures.iter().all(|f| !f.message.as_deref().unwrap_or("").is_empty()));
    }

    #[test]
    fn test_files_outside_module_dirs_are_ignored() {
        let dir = TempDir::new().expect("create temp dir");
        write(dir.path(), "data/config.json", "{}");
        write(dir.path(), "ping.yaml", "module: command\nname: ping\ndeployment: global\nexecute: ping\n");

        let catalog = HandlerCatalog::with_defaults();
        let found = Discovery::new(&catalog).run(&PathIndexer::new(dir.path()));

        assert_eq!(found.report.total(), 0);
    }

    #[test]
    fn test_discovered_event_can_be_unsubscribed() {
        let dir = TempDir::new().expect("create temp dir");
        write(dir.path(), "events/a_guild.yaml", "module: event\nname: guildCreate\nexecute: log\n");
        write(dir.path(), "events/b_guild.yaml", "module: event\nname: guildCreate\nexecute: log\n");

        let catalog = HandlerCatalog::with_defaults();
        let mut found = Discovery::new(&catalog).run(&PathIndexer::new(dir.path()));

        assert_eq!(found.subscriptions.len(), 2);
        let first = found.subscriptions[0].clone();
        assert_eq!(first.event, "guildCreate");
        assert_eq!(first.module, "events/a_guild.yaml");

        let ctx = BotContext::default();
        assert_eq!(found.events.emit(&ctx, "guildCreate", &[]), 2);
        assert!(found.events.unsubscribe(first.id));
        assert_eq!(found.events.emit(&ctx, "guildCreate", &[]), 1);
    }
}
