//! Review watcher CLI
//!
//! Command-line interface for the homework review status watcher.

use std::path::PathBuf;

use clap::Parser;
use review_watcher::logging::init_logging;
use review_watcher::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "review-watcher")]
#[command(about = "Homework review status watcher with Telegram notifications")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file (overrides config file and LOG_FILE)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seconds between polls (overrides config file and RETRY_PERIOD)
    #[arg(long)]
    retry_period: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "debug")]
    log_level: Level,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let dotenv = dotenvy::dotenv();

    let mut config = if let Some(config_path) = &args.config {
        load_config(config_path)?
    } else {
        Config::default()
    };
    config.apply_env()?;

    if let Some(log_file) = args.log_file {
        config.log_file = log_file;
    }
    if let Some(retry_period) = args.retry_period {
        config.retry_period_seconds = retry_period;
    }

    init_logging(args.log_level, Some(config.log_file.as_path()))?;

    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
        Err(e) => tracing::debug!("No .env file loaded: {}", e),
    }
    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_level={:?}",
        args.config,
        args.log_level
    );
    tracing::debug!("Effective configuration: {:?}", config);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(review_watcher::run(config))?;

    Ok(())
}
