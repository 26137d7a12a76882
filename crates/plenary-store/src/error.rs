use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("roster file not found: {0}")]
    RosterNotFound(std::path::PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("roster JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}
