use clap::{Parser, Subcommand};
use std::process::ExitCode;

use halfbot::application::services::{self, HandlerCatalog, Runtime, RuntimeOptions};
use halfbot::domain::traits::Connection;
use halfbot::infrastructure::adapters::{ConsoleConnection, DiscordConnection};
use halfbot::infrastructure::config::Config;

#[derive(Parser)]
#[command(name = "halfbot")]
#[command(about = "A chat bot built from command and event modules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Load modules and show where each command would be registered
    Check,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => match load_config(&cli.config, cli.token) {
            Some(config) => run_bot(config),
            None => ExitCode::FAILURE,
        },
        Commands::Check => match load_config(&cli.config, cli.token) {
            Some(config) => check_modules(config),
            None => ExitCode::FAILURE,
        },
        Commands::Version => {
            println!("halfbot v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::InitConfig => init_config(),
    }
}

fn load_config(config_path: &str, token_override: Option<String>) -> Option<Config> {
    match Config::resolve(config_path, token_override) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::error!("Failed to load config {}: {}", config_path, e);
            None
        }
    }
}

fn build_runtime() -> Option<tokio::runtime::Runtime> {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => Some(rt),
        Err(e) => {
            tracing::error!("Failed to start async runtime: {}", e);
            None
        }
    }
}

fn run_bot(config: Config) -> ExitCode {
    tracing::info!("Starting {}", config.bot.name);

    let Some(rt) = build_runtime() else {
        return ExitCode::FAILURE;
    };
    let options = RuntimeOptions::from_config(&config);
    let catalog = HandlerCatalog::with_defaults();

    let result = rt.block_on(async {
        match config.token() {
            Some(token) => {
                let connection = DiscordConnection::new(token, &config.discord);
                run_until_shutdown(connection, catalog, options).await
            }
            None => {
                // No token: run the console bot (dev mode)
                let connection = ConsoleConnection::new(config.bot.name.clone());
                run_until_shutdown(connection, catalog, options).await
            }
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_until_shutdown<C: Connection>(
    connection: C,
    catalog: HandlerCatalog,
    options: RuntimeOptions,
) -> Result<(), halfbot::BotError> {
    let runtime = Runtime::new(connection, catalog, options);

    tokio::select! {
        summary = runtime.run() => {
            let summary = summary?;
            if !summary.reconcile.is_success() {
                tracing::warn!("Some command scopes were not registered");
            }
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
            Ok(())
        }
    }
}

fn check_modules(config: Config) -> ExitCode {
    let Some(rt) = build_runtime() else {
        return ExitCode::FAILURE;
    };
    let options = RuntimeOptions::from_config(&config);
    let catalog = HandlerCatalog::with_defaults();

    let prepared = match rt.block_on(services::prepare(&catalog, &options)) {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    services::report::log_report(&prepared.report);

    let deployment = prepared.context.data.deployment_config();
    for group in services::plan(&prepared.context.commands, &deployment) {
        println!("{}: {}", group.scope, group.names().join(", "));
    }
    for subscription in &prepared.subscriptions {
        println!("event {}: {}", subscription.event, subscription.module);
    }

    if prepared.report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_config() -> ExitCode {
    let config = Config::default();
    match serde_yaml::to_string(&config) {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to serialize config: {}", e);
            ExitCode::FAILURE
        }
    }
}
