//! Reconciler - Makes the remote command lists match the command table

use super::deployment;
use crate::domain::entities::{CommandDefinition, CommandTable, DeploymentConfig};
use crate::domain::traits::{Connection, ScopeId};

/// Commands that share a remote scope, in registration order
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeGroup {
    pub scope: ScopeId,
    pub commands: Vec<CommandDefinition>,
}

impl ScopeGroup {
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Result of the registration call for one scope
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeOutcome {
    pub scope: ScopeId,
    pub requested: usize,
    /// Acknowledged count, or the error message
    pub result: Result<usize, String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub scopes: Vec<ScopeOutcome>,
}

impl ReconcileReport {
    pub fn is_success(&self) -> bool {
        self.scopes.iter().all(|s| s.result.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ScopeOutcome> {
        self.scopes.iter().filter(|s| s.result.is_err())
    }
}

/// Group commands by resolved scope.
///
/// Scopes appear in the order their first command was registered.
pub fn plan(commands: &CommandTable, config: &DeploymentConfig) -> Vec<ScopeGroup> {
    let mut groups: Vec<ScopeGroup> = Vec::new();

    for command in commands.iter() {
        let scope = deployment::resolve(command.deployment, config);
        let definition = command.definition.clone();

        match groups.iter_mut().find(|g| g.scope == scope) {
            Some(group) => group.commands.push(definition),
            None => groups.push(ScopeGroup {
                scope,
                commands: vec![definition],
            }),
        }
    }

    groups
}

/// Replace the remote command list of every planned scope.
///
/// Calls run one after another; a failing scope is recorded and the
/// remaining scopes are still registered.
pub async fn reconcile<C>(connection: &C, commands: &CommandTable, config: &DeploymentConfig) -> ReconcileReport
where
    C: Connection + ?Sized,
{
    let mut report = ReconcileReport::default();

    for group in plan(commands, config) {
        let requested = group.commands.len();
        let result = connection
            .set_commands(&group.scope, &group.commands)
            .await
            .map_err(|e| e.to_string());

        match &result {
            Ok(acknowledged) => {
                tracing::info!("Registered {} command(s) in {} scope", acknowledged, group.scope);
            }
            Err(e) => {
                tracing::error!("Failed to register {} command(s) in {} scope: {}", requested, group.scope, e);
            }
        }

        report.scopes.push(ScopeOutcome {
            scope: group.scope,
            requested,
            result,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::{BotError, CommandError};
    use crate::domain::entities::{
        BotContext, CommandModule, Deployment, GatewayEvent, Interaction,
    };
    use crate::domain::traits::BotInfo;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tokio::sync::mpsc;

    fn command(name: &str, deployment: Deployment) -> CommandModule {
        CommandModule {
            path: PathBuf::from(format!("commands/{name}.yaml")),
            definition: CommandDefinition::new(name, name),
            deployment,
            handler: Arc::new(|_: &BotContext, _: &Interaction| -> Result<String, CommandError> {
                Ok(String::new())
            }),
        }
    }

    fn table(commands: &[(&str, Deployment)]) -> CommandTable {
        let mut table = CommandTable::new();
        for (name, deployment) in commands {
            table.insert(command(name, *deployment));
        }
        table
    }

    /// Records calls; fails for the scopes listed in `failing`
    #[derive(Default)]
    struct FakeConnection {
        calls: Mutex<Vec<(ScopeId, Vec<String>)>>,
        failing: Vec<ScopeId>,
    }

    #[async_trait]
    impl Connection for FakeConnection {
        async fn login(&mut self) -> Result<mpsc::Receiver<GatewayEvent>, BotError> {
            let (_tx, rx) = mpsc::channel(1);
            Ok(rx)
        }

        async fn set_commands(&self, scope: &ScopeId, commands: &[CommandDefinition]) -> Result<usize, BotError> {
            let names = commands.iter().map(|c| c.name.clone()).collect();
            self.calls.lock().unwrap().push((scope.clone(), names));
            if self.failing.contains(scope) {
                return Err(BotError::Network("503 Service Unavailable".to_string()));
            }
            Ok(commands.len())
        }

        async fn reply(&self, _interaction: &Interaction, _text: &str) -> Result<(), BotError> {
            Ok(())
        }

        fn bot_info(&self) -> BotInfo {
            BotInfo::new("1", "fake", "fake")
        }
    }

    #[test]
    fn test_plan_groups_by_scope_in_registration_order() {
        let commands = table(&[
            ("b", Deployment::Global),
            ("dev1", Deployment::Dev),
            ("a", Deployment::Global),
            ("sup", Deployment::Support),
        ]);
        let config = DeploymentConfig {
            dev: Some("111".to_string()),
            support: None,
        };

        let groups = plan(&commands, &config);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].scope, ScopeId::global());
        assert_eq!(groups[0].names(), vec!["b", "a", "sup"]);
        assert_eq!(groups[1].scope, ScopeId::guild("111"));
        assert_eq!(groups[1].names(), vec!["dev1"]);
    }

    #[test]
    fn test_plan_empty_table() {
        assert!(plan(&CommandTable::new(), &DeploymentConfig::default()).is_empty());
    }

    #[tokio::test]
    async fn test_one_call_per_scope() {
        let commands = table(&[("ping", Deployment::Global), ("debug", Deployment::Dev)]);
        let config = DeploymentConfig {
            dev: Some("111".to_string()),
            support: None,
        };
        let connection = FakeConnection::default();

        let report = reconcile(&connection, &commands, &config).await;

        assert!(report.is_success());
        let calls = connection.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                (ScopeId::global(), vec!["ping".to_string()]),
                (ScopeId::guild("111"), vec!["debug".to_string()]),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_scope_does_not_stop_the_rest() {
        let commands = table(&[
            ("ping", Deployment::Global),
            ("debug", Deployment::Dev),
            ("ticket", Deployment::Support),
        ]);
        let config = DeploymentConfig {
            dev: Some("111".to_string()),
            support: Some("222".to_string()),
        };
        let connection = FakeConnection {
            failing: vec![ScopeId::guild("111")],
            ..Default::default()
        };

        let report = reconcile(&connection, &commands, &config).await;

        assert_eq!(connection.calls.lock().unwrap().len(), 3);
        assert!(!report.is_success());
        let failed: Vec<_> = report.failed().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].scope, ScopeId::guild("111"));
        assert_eq!(failed[0].requested, 1);
        assert_eq!(report.scopes[2].result, Ok(1));
    }
}
