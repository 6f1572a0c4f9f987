//! Error types for furthest1d.

use thiserror::Error;

/// Top-level error type for construction and query operations.
#[derive(Debug, Error)]
pub enum FurthestError {
    /// A caller-correctable precondition was violated.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Checked access past the end of a result view.
    #[error("index {index} out of range for view of length {len}")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Length of the view.
        len: usize,
    },

    /// I/O error wrapper.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde serialization/deserialization error.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl FurthestError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type for furthest1d operations.
pub type Result<T> = std::result::Result<T, FurthestError>;
