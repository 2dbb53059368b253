use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProverError {
    #[error("external tool failed: {0}")]
    ExternalTool(String),

    #[error("proof artifact missing at {}", .0.display())]
    ProofArtifactMissing(PathBuf),

    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Commit(#[from] commitment::errors::CommitError),

    #[error("orchestrator queue closed")]
    QueueClosed,
}
