//! Client for the homework review status API

use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::io::HttpClient;

/// Parsed body of a review status response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    body: Value,
}

impl ApiResponse {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Parse a raw response body, failing with a format error on invalid JSON
    pub fn parse(raw: &str) -> crate::Result<Self> {
        serde_json::from_str(raw)
            .map(Self::new)
            .map_err(|e| crate::WatcherError::Format(e.to_string()))
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Server time reported with the response, used as the next cursor
    pub fn current_date(&self) -> Option<i64> {
        self.body.get("current_date").and_then(Value::as_i64)
    }
}

/// Review status API client
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(config: &Config, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", config.endpoint);

        Self {
            endpoint: config.endpoint.clone(),
            authorization: format!("OAuth {}", config.practicum_token),
            http,
        }
    }

    /// Fetch statuses updated since `cursor` (Unix seconds). One request, no retry.
    pub async fn fetch_review_status(&self, cursor: i64) -> crate::Result<ApiResponse> {
        let from_date = cursor.to_string();
        let response = self
            .http
            .get(
                &self.endpoint,
                &[("from_date", from_date.as_str())],
                &[("Authorization", self.authorization.as_str())],
            )
            .await
            .map_err(|e| match e {
                crate::WatcherError::Api(msg) => {
                    crate::WatcherError::Api(format!("request failed: {}", msg))
                }
                other => other,
            })?;

        if response.status == 400 {
            tracing::error!("Endpoint {} is unavailable (status 400)", self.endpoint);
            return Err(crate::WatcherError::Api(format!(
                "endpoint {} unavailable: status 400",
                self.endpoint
            )));
        }

        if response.status != 200 {
            tracing::error!(
                "Request to {} failed with status {}",
                self.endpoint,
                response.status
            );
            return Err(crate::WatcherError::Api(format!(
                "unexpected status {} from {}",
                response.status, self.endpoint
            )));
        }

        ApiResponse::parse(&response.body)
    }
}
