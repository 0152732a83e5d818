use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookalikeError {
    #[error(
        "embeddings artifact not found at {}; run `viralplan-cli embeddings build` first",
        .path.display()
    )]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid embeddings artifact: {0}")]
    InvalidArtifact(String),

    #[error("invalid embedding dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("text encoder error: {0}")]
    Encoder(String),
}
