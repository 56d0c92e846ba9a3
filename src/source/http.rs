//! HTTP record source.
//!
//! Fetches a JSON array of records with a single GET request.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::{parse_records, RecordSource};
use crate::error::{Result, TypeaheadError};

/// Default timeout for requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Loads records from an HTTP(S) endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
    client: Client,
}

impl HttpSource {
    /// Creates a source for `url`.
    pub fn new(url: Url, config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TypeaheadError::source(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { url, client })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    fn location(&self) -> String {
        self.url.to_string()
    }

    async fn load(&self) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TypeaheadError::source(format!("Request to {} timed out", self.url))
                } else if e.is_connect() {
                    TypeaheadError::source(format!("Failed to connect to {}", self.url))
                } else {
                    TypeaheadError::source(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TypeaheadError::source(format!(
                "{} returned HTTP {}",
                self.url, status
            )));
        }

        let document: Value = response
            .json()
            .await
            .map_err(|e| TypeaheadError::source(format!("Failed to parse response: {}", e)))?;

        parse_records(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Fetcher;

    #[test]
    fn test_location_is_url() {
        let url = Url::parse("https://jsonplaceholder.typicode.com/users").unwrap();
        let source = HttpSource::new(url, HttpConfig::default()).unwrap();
        assert_eq!(
            source.location(),
            "https://jsonplaceholder.typicode.com/users"
        );
    }

    #[test]
    fn test_config_with_timeout() {
        let config = HttpConfig::default().with_timeout(5);
        assert_eq!(config.timeout_secs, 5);
    }

    #[tokio::test]
    async fn test_unreachable_host_sets_error_flag() {
        // Port 1 on loopback refuses connections
        let url = Url::parse("http://127.0.0.1:1/users").unwrap();
        let source = HttpSource::new(url, HttpConfig::default().with_timeout(5)).unwrap();

        assert!(source.load().await.is_err());

        let mut fetcher = Fetcher::new();
        let state = fetcher.fetch(&source).await;
        assert!(state.error);
        assert!(state.data.is_empty());
    }
}
