//! Fetch settings for the website client and the harvester.

use std::time::Duration;

use plenary_core::meeting::DEFAULT_BASE_URL;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Website root, e.g. `https://www.dekamer.be`.
    pub base_url: String,
    /// Re-requests of a page that came back as the site's error page.
    pub marker_retries: u32,
    /// Re-requests after a connection failure or a 5xx.
    pub transport_retries: u32,
    /// Delay between error-page retries; transport retries grow it linearly.
    pub backoff_ms: u64,
    /// Meetings fetched and parsed concurrently.
    pub workers: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            marker_retries: 10,
            transport_retries: 5,
            backoff_ms: 1000,
            workers: 10,
        }
    }
}

impl FetchConfig {
    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}
