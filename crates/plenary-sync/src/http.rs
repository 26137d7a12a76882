//! HTTP access to the parliament website.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::FetchConfig;

/// Legacy pages are served as Windows-1252 without declaring it.
const FALLBACK_CHARSET: &str = "windows-1252";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status} for {url}")]
    Server { status: u16, url: String },
    #[error("{url} kept returning the error page after {attempts} attempts")]
    Exhausted { url: String, attempts: u32 },
}

impl FetchError {
    /// Failures worth another request: connection trouble, timeouts, 5xx and 429.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            Self::Server { status, .. } => *status >= 500 || *status == 429,
            Self::Exhausted { .. } => false,
        }
    }
}

/// Somewhere transcripts and listings can be read from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Body of the page at `url`, decoded to text.
    async fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// [`DocumentSource`] over `reqwest`, retrying transient failures.
pub struct HttpSource {
    client: reqwest::Client,
    retries: u32,
    backoff: Duration,
}

impl HttpSource {
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            retries: config.transport_retries,
            backoff: config.backoff(),
        }
    }

    async fn try_get(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Server {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp.text_with_charset(FALLBACK_CHARSET).await?)
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.try_get(url).await {
                Ok(body) => {
                    debug!(url = %url, attempt, bytes = body.len(), "fetched");
                    return Ok(body);
                }
                Err(e) if e.is_transient() && attempt <= self.retries => {
                    let delay = self.backoff * attempt;
                    warn!(url = %url, attempt, error = %e, delay_ms = delay.as_millis() as u64, "transient fetch failure, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
