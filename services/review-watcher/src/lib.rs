//! Review watcher - homework review status notifications
//!
//! Polls the homework review API, detects status changes of the latest
//! submission, and reports them to a Telegram chat.

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod notifier;
pub mod practicum;
pub mod review;
pub mod state;
pub mod telegram;

pub use config::{load_config, Config};
pub use error::{Result, WatcherError};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::engine::Engine;
use crate::io::ReqwestHttpClient;
use crate::notifier::{MessageChannel, Notifier};
use crate::practicum::PracticumClient;
use crate::state::WatcherState;
use crate::telegram::TelegramChannel;

/// Run the review watcher with the given configuration
pub async fn run(config: Config) -> Result<()> {
    config::ensure_tokens(&config)?;

    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::new(config.request_timeout())?);
    let cancel = CancellationToken::new();

    let client = PracticumClient::new(&config, Arc::clone(&http));
    let channel: Arc<dyn MessageChannel> = Arc::new(TelegramChannel::new(&config, http));
    let notifier = Notifier::new(channel, config.telegram_chat_id.clone());

    let engine = Engine::new(client, notifier, &config, cancel.clone());

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    let mut state = WatcherState::starting_now();
    tracing::info!(
        "Review watcher started: polling {} every {:?} from {}",
        config.endpoint,
        config.retry_period(),
        state.cursor
    );

    // Runs until cancelled
    engine.run(&mut state).await;

    tracing::info!("Review watcher stopped");
    Ok(())
}
