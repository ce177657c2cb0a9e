//! Notification channel trait and the fixed-destination notifier

use std::sync::Arc;

use async_trait::async_trait;

/// Transport that can deliver a text message to a chat
#[async_trait]
pub trait MessageChannel: Send + Sync + std::fmt::Debug {
    /// Get the channel type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Deliver `text` to `chat_id`
    async fn send_text(&self, chat_id: &str, text: &str) -> crate::Result<()>;
}

/// Sends every message to one configured chat
#[derive(Debug, Clone)]
pub struct Notifier {
    channel: Arc<dyn MessageChannel>,
    chat_id: String,
}

impl Notifier {
    pub fn new(channel: Arc<dyn MessageChannel>, chat_id: impl Into<String>) -> Self {
        Self {
            channel,
            chat_id: chat_id.into(),
        }
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// Send a message. Channel failures are logged and returned as
    /// `SendMessage` errors.
    pub async fn notify(&self, message: &str) -> crate::Result<()> {
        tracing::debug!(
            "Sending message via '{}' to {}: {}",
            self.channel.type_name(),
            self.chat_id,
            message
        );

        match self.channel.send_text(&self.chat_id, message).await {
            Ok(()) => {
                tracing::info!("Message sent to {}", self.chat_id);
                Ok(())
            }
            Err(e) => {
                let err = match e {
                    crate::WatcherError::SendMessage(detail) => {
                        crate::WatcherError::SendMessage(detail)
                    }
                    other => crate::WatcherError::SendMessage(other.to_string()),
                };
                tracing::error!("Failed to send message to {}: {}", self.chat_id, err);
                Err(err)
            }
        }
    }
}
