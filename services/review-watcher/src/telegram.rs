//! Telegram Bot API message channel

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::io::HttpClient;
use crate::notifier::MessageChannel;

/// Envelope returned by every Bot API method
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram bot sender
pub struct TelegramChannel {
    send_message_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramChannel").finish_non_exhaustive()
    }
}

impl TelegramChannel {
    pub fn new(config: &Config, http: Arc<dyn HttpClient>) -> Self {
        let send_message_url = format!(
            "{}/bot{}/sendMessage",
            config.telegram_api_url.trim_end_matches('/'),
            config.telegram_token
        );

        tracing::debug!("Created TelegramChannel at {}", config.telegram_api_url);

        Self {
            send_message_url,
            http,
        }
    }
}

#[async_trait]
impl MessageChannel for TelegramChannel {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn send_text(&self, chat_id: &str, text: &str) -> crate::Result<()> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });

        let response = self.http.post_json(&self.send_message_url, &body).await?;

        let parsed = serde_json::from_str::<BotApiResponse>(&response.body).ok();
        if response.status != 200 || !parsed.as_ref().is_some_and(|p| p.ok) {
            let description = parsed
                .and_then(|p| p.description)
                .unwrap_or(response.body);
            return Err(crate::WatcherError::SendMessage(format!(
                "Telegram API returned status {}: {}",
                response.status, description
            )));
        }

        tracing::debug!("Telegram message delivered to {}", chat_id);
        Ok(())
    }
}
