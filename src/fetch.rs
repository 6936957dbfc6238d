//! Async HTTP feed fetcher wrapping reqwest.
//!
//! Deliberately minimal: one GET with an explicit timeout and limited
//! redirects, reject-on-failure. No retry or backoff — a failed fetch
//! surfaces as a transport error and the pipeline stops.

use crate::error::WidgetError;
use std::time::Duration;

/// HTTP client for the feed loader.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: reqwest::Client,
}

impl FeedFetcher {
    /// Create a fetcher with the given per-request timeout.
    pub fn new(timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("placard/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Fetch the feed body as text. Non-2xx statuses are transport
    /// failures, same as connection errors and timeouts.
    pub async fn fetch_text(&self, url: &str) -> Result<String, WidgetError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WidgetError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WidgetError::Transport(format!(
                "HTTP {status} from feed endpoint"
            )));
        }

        resp.text()
            .await
            .map_err(|e| WidgetError::Transport(e.to_string()))
    }
}
