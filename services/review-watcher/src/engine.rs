//! Engine: one fetch, evaluate and notify cycle, repeated on a fixed interval

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::notifier::Notifier;
use crate::practicum::PracticumClient;
use crate::review::{extract_latest_submission, format_verdict};
use crate::state::WatcherState;
use crate::WatcherError;

/// Sent when the response carries no submissions
pub const NO_NEW_STATUS_MESSAGE: &str = "Статус работы не изменился";

/// Prefix of fault messages
pub const FAULT_PREFIX: &str = "Сбой в работе программы";

/// How a cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    StatusChanged,
    NoNewStatus,
    Fault,
}

/// Result of a single cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub outcome: CycleOutcome,
    pub message: String,
    /// A send was attempted
    pub notified: bool,
    /// The channel accepted the message
    pub delivered: bool,
}

/// The engine polls the review API and dispatches notifications
pub struct Engine {
    client: PracticumClient,
    notifier: Notifier,
    retry_period: Duration,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        client: PracticumClient,
        notifier: Notifier,
        config: &Config,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            notifier,
            retry_period: config.retry_period(),
            cancel,
        }
    }

    /// Run cycles until the cancellation token is triggered
    pub async fn run(&self, state: &mut WatcherState) {
        loop {
            let report = self.run_cycle(state).await;
            tracing::debug!(
                "Cycle finished: {:?} (notified={}), next from_date={}",
                report.outcome,
                report.notified,
                state.cursor
            );

            tokio::select! {
                _ = tokio::time::sleep(self.retry_period) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }

    /// Run exactly one cycle against `state`
    pub async fn run_cycle(&self, state: &mut WatcherState) -> CycleReport {
        let (outcome, message) = match self.evaluate(state).await {
            Ok(message) => (CycleOutcome::StatusChanged, message),
            Err(e) if e.is_benign() => {
                tracing::debug!("No new statuses in response");
                (CycleOutcome::NoNewStatus, NO_NEW_STATUS_MESSAGE.to_string())
            }
            Err(e) => {
                let message = format!("{}: {}", FAULT_PREFIX, e.describe());
                tracing::error!("{}", message);
                (CycleOutcome::Fault, message)
            }
        };

        // Faults are always reported; everything else only on change
        let notify = outcome == CycleOutcome::Fault || state.is_new_message(&message);
        let delivered = if notify {
            self.notifier.notify(&message).await.is_ok()
        } else {
            tracing::debug!("Message unchanged since last cycle, not sending");
            false
        };

        state.remember(message.clone());

        CycleReport {
            outcome,
            message,
            notified: notify,
            delivered,
        }
    }

    /// Fetch once and turn the response into a status message. The cursor
    /// only moves when a response was received and validated.
    async fn evaluate(&self, state: &mut WatcherState) -> crate::Result<String> {
        let response = self.client.fetch_review_status(state.cursor).await?;

        let submission = match extract_latest_submission(&response) {
            Ok(submission) => submission,
            Err(WatcherError::EmptyList) => {
                state.advance_cursor(response.current_date());
                return Err(WatcherError::EmptyList);
            }
            Err(e) => return Err(e),
        };

        let message = format_verdict(&submission)?;
        tracing::info!("Latest submission: {}", submission);
        state.advance_cursor(response.current_date());
        Ok(message)
    }
}
