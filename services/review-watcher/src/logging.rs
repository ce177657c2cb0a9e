//! Console and log file output

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Install the global subscriber: colored console output plus, when given,
/// a plain-text copy appended to `log_file`.
pub fn init_logging(level: Level, log_file: Option<&Path>) -> crate::Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .map_err(|e| crate::WatcherError::Config(format!("Installing log subscriber: {}", e)))
}
