//! Page fetching seam.
//!
//! The pipeline only needs "give me the body behind this URL"; keeping that
//! behind a trait lets the web layer and tests swap the transport.

use async_trait::async_trait;
use mirror_http::{FetchedPage, HttpClient, HttpError, RequestOpts};
use std::time::Duration;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Perform one request for `url`. Implementations must not retry.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, HttpError>;
}

/// [`PageFetcher`] backed by the shared [`HttpClient`].
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: HttpClient,
}

impl HttpFetcher {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Build a client with the given identification and per-request timeout.
    pub fn with_settings(user_agent: &str, timeout: Duration) -> Result<Self, HttpError> {
        let client = HttpClient::new(user_agent)?.with_timeout(timeout);
        Ok(Self::new(client))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, HttpError> {
        self.client.get(url, RequestOpts::default()).await
    }
}
