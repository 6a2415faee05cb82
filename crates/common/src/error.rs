//! Error types shared across the PSR tools.

use std::path::PathBuf;

use psr_label_model::LabelError;

/// Top-level error type for PSR labeling operations.
#[derive(Debug, thiserror::Error)]
pub enum PsrError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Dataset error: {message}")]
    Dataset { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Label(#[from] LabelError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using PsrError.
pub type PsrResult<T> = Result<T, PsrError>;

impl PsrError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset {
            message: msg.into(),
        }
    }
}
