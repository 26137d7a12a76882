//! Retrying pages that came back as the site's error page.
//!
//! The website sometimes answers 200 with a generic error page instead of
//! the transcript. That body is recognisable by a fixed Dutch phrase.

use std::time::Duration;

use tracing::warn;

use crate::http::{DocumentSource, FetchError};

/// Phrase of the website's error page.
pub const ERROR_MARKER: &str = "Er heeft zich een fout voorgedaan";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(String),
    /// Every attempt returned the error page.
    Exhausted { attempts: u32 },
}

/// Fetch `url`, re-requesting up to `retries` times while the error page
/// comes back, waiting `backoff` between attempts. Transport errors are
/// returned as-is.
pub async fn fetch_with_marker_retry(
    source: &dyn DocumentSource,
    url: &str,
    retries: u32,
    backoff: Duration,
) -> Result<FetchOutcome, FetchError> {
    let attempts = retries + 1;
    for attempt in 1..=attempts {
        let body = source.get(url).await?;
        if !body.contains(ERROR_MARKER) {
            return Ok(FetchOutcome::Success(body));
        }
        warn!(url = %url, attempt, "website returned its error page");
        if attempt < attempts {
            tokio::time::sleep(backoff).await;
        }
    }
    Ok(FetchOutcome::Exhausted { attempts })
}
