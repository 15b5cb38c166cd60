use crate::errors::AppResult;
use clap::{Parser, Subcommand};
use tracing_subscriber;

pub mod commands;

/// Mobility Feed Payload Decoder
#[derive(Parser)]
#[command(name = "mobility-feed-decoder")]
#[command(about = "Decode embedded binary payloads of transport-data feed responses")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Decode every <binary> payload of a feed response file
    Decode(commands::decode::DecodeCommand),
    /// Decode a feed response file and write one export format
    Export(commands::export::ExportCommand),
    /// Fetch a feed response through the mutual-TLS proxy
    Fetch(commands::fetch::FetchCommand),
}

pub async fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode(command) => command.run(),
        Commands::Export(command) => command.run(),
        Commands::Fetch(command) => command.run().await,
    }
}
