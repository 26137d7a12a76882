//! Fetch layer: website client, error-page retries and the meeting harvester.

pub mod config;
pub mod harvest;
pub mod http;
pub mod retry;

pub use config::FetchConfig;
pub use harvest::Harvester;
pub use http::{DocumentSource, FetchError, HttpSource};
pub use retry::{ERROR_MARKER, FetchOutcome, fetch_with_marker_retry};
