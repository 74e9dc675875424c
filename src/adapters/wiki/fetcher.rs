//! reqwest-backed page fetcher. Implements PageFetcher.

use crate::domain::ExtractionError;
use crate::ports::PageFetcher;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP page fetcher with a browser User-Agent and a bounded timeout.
pub struct ReqwestPageFetcher {
    client: Client,
}

impl ReqwestPageFetcher {
    /// Create a fetcher.
    ///
    /// # Arguments
    /// * `user_agent` - Sent with every request
    /// * `timeout` - Whole-request timeout (connect + body)
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ExtractionError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| ExtractionError::FetchFailure(format!("HTTP client setup: {}", e)))?;
        Ok(Self { client })
    }
}

/// Any non-2xx status is a fetch failure; redirects have already been followed.
fn check_status(status: StatusCode, url: &str) -> Result<(), ExtractionError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ExtractionError::FetchFailure(format!(
            "HTTP {} for url ({})",
            status, url
        )))
    }
}

#[async_trait::async_trait]
impl PageFetcher for ReqwestPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ExtractionError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExtractionError::FetchFailure(e.to_string()))?;

        let status = response.status();
        check_status(status, url).inspect_err(|_| {
            warn!(url, status = %status, "page fetch returned error status");
        })?;

        let body = response
            .text()
            .await
            .map_err(|e| ExtractionError::FetchFailure(format!("reading body: {}", e)))?;
        debug!(url, bytes = body.len(), "page fetched");
        Ok(body)
    }
}
