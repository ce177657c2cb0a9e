//! Configuration types for the review watcher

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

pub const ENV_PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const ENV_TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const ENV_ENDPOINT: &str = "ENDPOINT";
pub const ENV_RETRY_PERIOD: &str = "RETRY_PERIOD";
pub const ENV_LOG_FILE: &str = "LOG_FILE";

/// Main configuration structure
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub practicum_token: String,
    #[serde(default)]
    pub telegram_token: String,
    #[serde(default)]
    pub telegram_chat_id: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,
    #[serde(default = "default_retry_period")]
    pub retry_period_seconds: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            practicum_token: String::new(),
            telegram_token: String::new(),
            telegram_chat_id: String::new(),
            endpoint: default_endpoint(),
            telegram_api_url: default_telegram_api_url(),
            retry_period_seconds: default_retry_period(),
            request_timeout_seconds: default_request_timeout(),
            log_file: default_log_file(),
        }
    }
}

// Tokens never end up in log output
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &redact(&self.practicum_token))
            .field("telegram_token", &redact(&self.telegram_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_period_seconds", &self.retry_period_seconds)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("log_file", &self.log_file)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl Config {
    /// Overlay values from the process environment
    pub fn apply_env(&mut self) -> crate::Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary lookup. A variable that is present
    /// replaces the configured value, even when empty.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> crate::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_PRACTICUM_TOKEN) {
            self.practicum_token = value;
        }
        if let Some(value) = lookup(ENV_TELEGRAM_TOKEN) {
            self.telegram_token = value;
        }
        if let Some(value) = lookup(ENV_TELEGRAM_CHAT_ID) {
            self.telegram_chat_id = value;
        }
        if let Some(value) = lookup(ENV_ENDPOINT) {
            self.endpoint = value;
        }
        if let Some(value) = lookup(ENV_RETRY_PERIOD) {
            self.retry_period_seconds = value.trim().parse().map_err(|e| {
                crate::WatcherError::Config(format!(
                    "{} must be a number of seconds, got {:?}: {}",
                    ENV_RETRY_PERIOD, value, e
                ))
            })?;
        }
        if let Some(value) = lookup(ENV_LOG_FILE) {
            self.log_file = PathBuf::from(value);
        }
        Ok(())
    }

    /// Names of the required values that are empty
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            (ENV_TELEGRAM_TOKEN, &self.telegram_token),
            (ENV_PRACTICUM_TOKEN, &self.practicum_token),
            (ENV_TELEGRAM_CHAT_ID, &self.telegram_chat_id),
            (ENV_ENDPOINT, &self.endpoint),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Returns true when every required value is present, logging each missing one
pub fn check_tokens(config: &Config) -> bool {
    let missing = config.missing_required();
    for name in &missing {
        tracing::error!(
            "CRITICAL: required environment variable {} is missing at startup",
            name
        );
    }
    missing.is_empty()
}

/// Startup guard: fails with a token error when any required value is missing
pub fn ensure_tokens(config: &Config) -> crate::Result<()> {
    if check_tokens(config) {
        Ok(())
    } else {
        Err(crate::WatcherError::Token(
            config.missing_required().join(", "),
        ))
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_telegram_api_url() -> String {
    DEFAULT_TELEGRAM_API_URL.to_string()
}

fn default_retry_period() -> u64 {
    600
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_file() -> PathBuf {
    PathBuf::from("main.log")
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::WatcherError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content).map_err(|e| {
        crate::WatcherError::Config(format!("Failed to parse config file {:?}: {}", path, e))
    })?;
    Ok(config)
}
