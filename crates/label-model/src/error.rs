//! Errors raised while editing, loading, or translating labels.

use std::path::PathBuf;

use crate::snapshot::FrameId;

/// Errors that can occur when working with PSR labels.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    /// Out-of-range component index or state value. Reported and ignored.
    #[error("Invalid edit: {message}")]
    InvalidEdit { message: String },

    /// Deletion attempted while only the initial snapshot remains.
    #[error("Nothing to delete: the initial snapshot cannot be removed")]
    NothingToDelete,

    /// A snapshot would land on a frame earlier than the latest one.
    #[error("Frame {frame} does not come after {previous}")]
    FrameOrder { frame: FrameId, previous: FrameId },

    #[error("Snapshot at frame {frame} has {found} states, expected {expected}")]
    LengthMismatch {
        frame: FrameId,
        expected: usize,
        found: usize,
    },

    #[error("Malformed snapshot on line {line}: {message}")]
    MalformedSnapshot { line: usize, message: String },

    #[error("Unknown action {action_id}: no entry in the procedure table")]
    UnknownAction { action_id: usize },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl LabelError {
    pub fn invalid_edit(msg: impl Into<String>) -> Self {
        Self::InvalidEdit {
            message: msg.into(),
        }
    }

    pub fn malformed(line: usize, msg: impl Into<String>) -> Self {
        Self::MalformedSnapshot {
            line,
            message: msg.into(),
        }
    }

    /// Whether the error is an operator mistake that leaves state untouched.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::InvalidEdit { .. } | Self::NothingToDelete | Self::FrameOrder { .. }
        )
    }
}

/// Result type alias using LabelError.
pub type LabelResult<T> = Result<T, LabelError>;
