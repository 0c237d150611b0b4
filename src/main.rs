use anyhow::Context;
use ckpool_dashboard::{shared::logging::LoggingUtils, AppConfig, HttpServer};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Serve ckpool pool and user statistics over HTTP
#[derive(Debug, Parser)]
#[command(name = "ckpool-dashboard", version, about)]
struct Cli {
    /// Path to the TOML config file; created with defaults if missing
    #[arg(long, value_name = "PATH", default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let created = AppConfig::write_default_if_missing(&cli.config)
        .with_context(|| format!("creating default config at {}", cli.config.display()))?;

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    LoggingUtils::initialize(&config.logging).context("initializing logging")?;

    if created {
        warn!(path = %cli.config.display(), "Config file not found, wrote defaults");
    }
    info!(path = %cli.config.display(), "Configuration loaded successfully");

    let server = HttpServer::new(config).context("initializing server")?;
    info!("Server initialized successfully");

    server.run().await.context("running server")?;
    Ok(())
}
