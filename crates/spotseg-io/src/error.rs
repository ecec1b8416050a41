//! I/O error types
//!
//! Provides a unified error type for dataset access, label persistence and
//! spot list parsing, so that callers only need to handle one error type.

use thiserror::Error;

/// Error type for dataset and spot list operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset document could not be parsed or serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A text input line is malformed
    #[error("format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// No region with the given name exists in the dataset
    #[error("region not found: {0}")]
    RegionNotFound(String),

    /// A label with the given name already exists in the dataset
    #[error("label '{0}' already exists")]
    DuplicateLabel(String),

    /// The dataset content is structurally invalid
    #[error("invalid dataset: {0}")]
    InvalidData(String),

    /// The session was already closed
    #[error("dataset session is closed")]
    SessionClosed,

    /// An error from the core library
    #[error("core error: {0}")]
    Core(#[from] spotseg_core::Error),
}

impl IoError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        IoError::Format {
            line,
            message: message.into(),
        }
    }
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
