//! Crate-level error types.
//!
//! The sizing and validation core never fails: degenerate input is reported
//! through [`PositionSizeResult::is_valid`](crate::sizing::PositionSizeResult)
//! and the validator's error list. [`JournalError`] only covers the edges
//! (configuration, the symbol overrides file, the terminal).

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, JournalError>;

/// Top-level error type returned by all fallible public APIs.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// An environment variable or configuration file was rejected.
    #[error("configuration error: {0}")]
    Config(String),

    /// A file or terminal operation failed.
    #[error("io error: {0}")]
    Io(String),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
