//! Error handling module for lbm
//!
//! Provides the crate error type using thiserror. Missing variables,
//! unterminated braces and unresolvable `..` segments are NOT errors; they
//! have defined outputs. Only structural problems end up here.

use thiserror::Error;

/// Main error type for lbm
#[derive(Error, Debug)]
pub enum LbmError {
    /// A required argument was absent or had the wrong shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Template references nested deeper than the configured limit
    #[error("Template nesting exceeds maximum depth of {limit}")]
    NestingTooDeep { limit: usize },

    /// IO errors (variable files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for lbm operations
pub type Result<T> = std::result::Result<T, LbmError>;

impl LbmError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
