//! Runtime integration tests: discovery, ready-time reconciliation and dispatch
//! Run with: cargo test --test runtime_test

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;
use tokio::sync::mpsc;

use halfbot::application::errors::BotError;
use halfbot::application::services::{HandlerCatalog, Runtime, RuntimeOptions};
use halfbot::domain::entities::{CommandDefinition, GatewayEvent, Interaction, ReadyInfo};
use halfbot::domain::traits::{BotInfo, Connection, ScopeId};

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Plays back scripted events and records every remote call
#[derive(Clone, Default)]
struct RecordingConnection {
    script: Vec<GatewayEvent>,
    failing: Vec<ScopeId>,
    calls: Arc<Mutex<Vec<(ScopeId, Vec<String>)>>>,
    replies: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingConnection {
    fn with_script(script: Vec<GatewayEvent>) -> Self {
        Self {
            script,
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<(ScopeId, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    fn replies(&self) -> Vec<(String, String)> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connection for RecordingConnection {
    async fn login(&mut self) -> Result<mpsc::Receiver<GatewayEvent>, BotError> {
        let (tx, rx) = mpsc::channel(self.script.len() + 1);
        for event in self.script.drain(..) {
            tx.send(event).await.map_err(|_| BotError::Disconnected)?;
        }
        Ok(rx)
    }

    async fn set_commands(&self, scope: &ScopeId, commands: &[CommandDefinition]) -> Result<usize, BotError> {
        let names = commands.iter().map(|c| c.name.clone()).collect();
        self.calls.lock().unwrap().push((scope.clone(), names));
        if self.failing.contains(scope) {
            return Err(BotError::Network("500 Internal Server Error".to_string()));
        }
        Ok(commands.len())
    }

    async fn reply(&self, interaction: &Interaction, text: &str) -> Result<(), BotError> {
        self.replies
            .lock()
            .unwrap()
            .push((interaction.command.clone(), text.to_string()));
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo::new("1", "test", "test")
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn ready() -> GatewayEvent {
    GatewayEvent::Ready(ReadyInfo::new(BotInfo::new("1", "test", "test")))
}

fn options(dir: &TempDir) -> RuntimeOptions {
    RuntimeOptions::new(dir.path().join("bot"), dir.path().join("bot/data"))
}

/// Three valid commands (two global, one dev) and one without `execute`
fn scenario_bot(dir: &TempDir) {
    let root = dir.path().join("bot");
    write(&root, "commands/alpha.yaml", "module: command\nname: alpha\ndeployment: global\nexecute: ping\n");
    write(&root, "commands/beta.yaml", "module: command\nname: beta\ndeployment: global\nexecute: help\n");
    write(&root, "commands/broken.yaml", "module: command\nname: broken\ndeployment: global\n");
    write(&root, "commands/dev/debug.yaml", "module: command\nname: debug\ndeployment: dev\nexecute: about\n");
    write(&root, "data/config.json", r#"{ "id": { "guild": { "dev": "111" } } }"#);
}

#[tokio::test]
async fn test_discovery_and_reconciliation_end_to_end() {
    ensure_init();
    let dir = TempDir::new().expect("create temp dir");
    scenario_bot(&dir);

    let connection = RecordingConnection::with_script(vec![ready()]);
    let runtime = Runtime::new(connection.clone(), HandlerCatalog::with_defaults(), options(&dir));
    let summary = runtime.run().await.expect("run should finish");

    assert_eq!(summary.context.commands.len(), 3);
    assert_eq!(summary.report.successes.len(), 3);
    assert_eq!(summary.report.failures.len(), 1);
    let failure = &summary.report.failures[0];
    assert_eq!(failure.identifier, "commands/broken.yaml");
    assert!(!failure.message.as_deref().unwrap_or("").is_empty());

    assert_eq!(
        connection.calls(),
        vec![
            (ScopeId::global(), vec!["alpha".to_string(), "beta".to_string()]),
            (ScopeId::guild("111"), vec!["debug".to_string()]),
        ]
    );
    assert!(summary.reconcile.is_success());
}

#[tokio::test]
async fn test_reconciliation_runs_once() {
    ensure_init();
    let dir = TempDir::new().expect("create temp dir");
    scenario_bot(&dir);

    let connection = RecordingConnection::with_script(vec![ready(), ready()]);
    let runtime = Runtime::new(connection.clone(), HandlerCatalog::with_defaults(), options(&dir));
    runtime.run().await.expect("run should finish");

    assert_eq!(connection.calls().len(), 2);
}

#[tokio::test]
async fn test_failing_scope_is_reported_not_fatal() {
    ensure_init();
    let dir = TempDir::new().expect("create temp dir");
    scenario_bot(&dir);

    let connection = RecordingConnection {
        failing: vec![ScopeId::global()],
        ..RecordingConnection::with_script(vec![ready()])
    };
    let runtime = Runtime::new(connection.clone(), HandlerCatalog::with_defaults(), options(&dir));
    let summary = runtime.run().await.expect("run should finish");

    assert_eq!(connection.calls().len(), 2);
    let failed: Vec<_> = summary.reconcile.failed().map(|s| s.scope.clone()).collect();
    assert_eq!(failed, vec![ScopeId::global()]);
}

#[tokio::test]
async fn test_closed_before_ready_is_an_error() {
    ensure_init();
    let dir = TempDir::new().expect("create temp dir");
    scenario_bot(&dir);

    let runtime = Runtime::new(RecordingConnection::default(), HandlerCatalog::with_defaults(), options(&dir));
    let result = runtime.run().await;

    assert!(matches!(result, Err(BotError::Disconnected)));
}

#[tokio::test]
async fn test_interactions_run_command_handlers() {
    ensure_init();
    let dir = TempDir::new().expect("create temp dir");
    scenario_bot(&dir);

    let connection = RecordingConnection::with_script(vec![
        ready(),
        GatewayEvent::Interaction(Interaction::new("i1", "alpha")),
        GatewayEvent::Interaction(Interaction::new("i2", "missing")),
    ]);
    let runtime = Runtime::new(connection.clone(), HandlerCatalog::with_defaults(), options(&dir));
    runtime.run().await.expect("run should finish");

    let replies = connection.replies();
    assert_eq!(replies[0], ("alpha".to_string(), "Pong!".to_string()));
    assert_eq!(replies[1], ("missing".to_string(), "Command not found: missing".to_string()));
}

#[tokio::test]
async fn test_events_reach_subscribed_modules() {
    ensure_init();
    let dir = TempDir::new().expect("create temp dir");
    write(
        &dir.path().join("bot"),
        "events/guild.yaml",
        "module: event\nname: guildCreate\nexecute: count\n",
    );

    let fired = Arc::new(AtomicUsize::new(0));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let catalog = {
        let fired = Arc::clone(&fired);
        let seen = Arc::clone(&seen);
        HandlerCatalog::with_defaults().with_event("count", move |ctx, args| {
            fired.fetch_add(1, Ordering::SeqCst);
            seen.lock().unwrap().push((ctx.data.brand().name, args.to_vec()));
            Ok(())
        })
    };

    let connection = RecordingConnection::with_script(vec![
        ready(),
        GatewayEvent::Dispatch {
            name: "guildCreate".to_string(),
            args: vec![json!({ "id": "42" }), json!(true)],
        },
        GatewayEvent::Dispatch {
            name: "messageCreate".to_string(),
            args: vec![],
        },
    ]);
    let runtime = Runtime::new(connection, catalog, options(&dir));
    let summary = runtime.run().await.expect("run should finish");

    assert_eq!(summary.report.successes.len(), 1);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        &[(Some("halfbot".to_string()), vec![json!({ "id": "42" }), json!(true)])]
    );
}
