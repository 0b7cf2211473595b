//! Crier CLI
//!
//! Publish content to the configured social networks from the command line.

mod app;
mod commands;
mod config;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::CrierConfig;

/// Crier: publish one piece of content to several social networks.
#[derive(Parser, Debug)]
#[command(name = "crier", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "CRIER_CONFIG", default_value = "crier.toml", global = true)]
    config: PathBuf,

    /// Log what would be published instead of calling the platforms.
    #[arg(long, global = true)]
    dry_run: bool,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Publish a local image or video file.
    Publish(commands::publish::PublishArgs),
    /// Publish media that is already hosted at a URL.
    PublishUrl(commands::publish::PublishUrlArgs),
    /// Publish hosted media to several platforms in order.
    PublishAll(commands::publish::PublishAllArgs),
    /// List the platforms that can be published to.
    Platforms,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = CrierConfig::load(&cli.config)?;
    config.apply_env(|name| std::env::var(name).ok());
    let orchestrator = app::build_orchestrator(&config, cli.dry_run)?;

    match cli.command {
        Command::Publish(args) => commands::publish::run(&orchestrator, &args, cli.format).await,
        Command::PublishUrl(args) => {
            commands::publish::run_url(&orchestrator, &args, cli.format).await
        }
        Command::PublishAll(args) => {
            commands::publish::run_all(&orchestrator, &args, cli.format).await
        }
        Command::Platforms => commands::platforms::run(&orchestrator, cli.format),
    }
}
