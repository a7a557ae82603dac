//! Bike Sharing Analysis dashboard - main entry point

use anyhow::{Context, Result};
use bikeshare_common::{init_logging, LoggingConfig};
use bikeshare_config::{Config, ConfigLoader};
use bikeshare_dashboard::{start_server, AppState, DashboardPipeline};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `bikeshare_data=trace`; overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ConfigLoader::load().context("Failed to load configuration")?,
    };

    if let Some(level) = &args.log_level {
        ConfigLoader::override_log_level(&mut config, level.clone())
            .with_context(|| format!("Invalid --log-level '{level}'"))?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    init_logging(LoggingConfig::from(&config.logging))?;

    info!("Starting Bike Sharing Analysis dashboard");

    let pipeline = DashboardPipeline::from_config(&config);
    info!(
        daily = %pipeline.paths().daily.display(),
        hourly = %pipeline.paths().hourly.display(),
        "Serving data files"
    );

    start_server(AppState::new(pipeline), &config.server.bind_address()).await
}
