//! Mirror transport.
//!
//! A mirror is a remotely hosted copy of the hosts list, fetched over
//! HTTP(S). The builder only sees the [`MirrorFetcher`] trait; the production
//! implementation wraps a shared reqwest client. Fetch failures of any kind
//! are recoverable: the builder falls back to the local cache.

use async_trait::async_trait;
use std::time::Duration;

/// Timeout applied to a single mirror request.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Mirror fetch failures.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The mirror answered with a non-success status.
    #[error("mirror returned HTTP {0}")]
    Status(u16),

    /// The request could not be completed (connect, TLS, timeout, body read).
    #[error("mirror request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Fetches the hosts list from a mirror URL.
#[async_trait]
pub trait MirrorFetcher {
    /// Performs one GET of `url` and returns the body as text.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP(S) [`MirrorFetcher`] over a reqwest client.
pub struct HttpMirrorFetcher {
    client: reqwest::Client,
}

impl HttpMirrorFetcher {
    /// Creates a fetcher with the default request timeout.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }
}

impl Default for HttpMirrorFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MirrorFetcher for HttpMirrorFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }
}
