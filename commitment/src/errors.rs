use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommitError {
    #[error("tab not found: {0}")]
    TabNotFound(String),

    #[error("capacity exceeded: {what} is {got}, limit is {limit}")]
    CapacityExceeded {
        what: &'static str,
        got: usize,
        limit: usize,
    },

    #[error("invalid field element: {0}")]
    InvalidField(String),

    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
