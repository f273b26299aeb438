use async_trait::async_trait;
use serde_json::Value;

use super::delay::delay;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("invalid JSON body: {0}")]
    Decode(String),
}

/// The seam between the SWR cache and the network. Production code uses
/// [`HttpFetcher`]; tests substitute counting or canned implementations.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Resolve `url` (a path relative to the fetcher's base) to its parsed
    /// JSON body, or fail on transport errors and non-2xx statuses.
    /// No retries.
    async fn fetch(&self, url: &str) -> Result<Value, FetchError>;
}

pub struct HttpFetcher {
    http: reqwest::Client,
    base_url: String,
    fake_delay_ms: u64,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>, fake_delay_ms: u64) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            fake_delay_ms,
        }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        delay(self.fake_delay_ms).await;

        let response = self
            .http
            .get(format!("{}{}", self.base_url, url))
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
