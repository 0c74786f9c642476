// src/main.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use profile_analyzer::environment::EnvironmentConfig;
use profile_analyzer::records_cli::{handle_records_command, RecordsCli};
use profile_analyzer::start_web_server;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "profilyze")]
#[command(about = "LinkedIn profile scoring and analysis API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the API server
    Serve,
    /// Manage stored analysis records
    Records(RecordsCli),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("profile_analyzer=info,rocket::server=off")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Records(records)) => handle_records_command(records).await,
        Some(Command::Serve) | None => serve().await,
    }
}

async fn serve() -> Result<()> {
    let port = std::env::var("ROCKET_PORT")
        .map_err(|_| anyhow::anyhow!("ROCKET_PORT environment variable not set"))?
        .parse::<u16>()
        .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;

    let config = EnvironmentConfig::load()?;
    config.ensure_directories().await?;

    info!("Starting Profilyze API server");
    info!(
        "Environment: {}",
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string())
    );
    info!("Database: {}", config.database_path.display());
    info!("Server: http://0.0.0.0:{}", port);

    start_web_server(config.database_path).await
}
