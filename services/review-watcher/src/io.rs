//! HTTP client abstraction for testability

use std::time::Duration;

use async_trait::async_trait;

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request with query parameters and extra headers
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> crate::Result<HttpResponse>;

    /// Send a POST request with a JSON body
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
#[derive(Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| crate::WatcherError::Config(format!("Building HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> crate::Result<HttpResponse> {
        tracing::debug!("GET {} {:?}", url, query);
        let mut request = self.client.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| crate::WatcherError::Api(format!("GET {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| crate::WatcherError::Api(format!("Reading response body: {}", e)))?;

        tracing::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse { status, body })
    }

    // The URL may embed a bot token, so it stays out of logs and errors
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> crate::Result<HttpResponse> {
        tracing::debug!("POST json request");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                crate::WatcherError::SendMessage(format!("POST failed: {}", e.without_url()))
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            crate::WatcherError::SendMessage(format!(
                "Reading response body: {}",
                e.without_url()
            ))
        })?;

        tracing::debug!("POST -> {} ({} bytes)", status, body.len());
        Ok(HttpResponse { status, body })
    }
}
