use std::path::PathBuf;

use thiserror::Error;

/// Erros do adaptador de classificação.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to read classifier {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse classifier {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse classifier: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid classifier model: {0}")]
    InvalidModel(String),

    #[error("unknown output format: {0}")]
    UnknownFormat(String),

    #[error("classification failed: {0}")]
    Failed(String),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
