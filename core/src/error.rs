//! Error types for loading and applying flag queries.
//!
//! Scanning itself never fails; these errors only come from reading query
//! configuration and serializing results.

use thiserror::Error;

/// Errors that can occur while loading or evaluating queries.
#[derive(Debug, Error)]
pub enum OptsError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Query configuration is structurally invalid.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

/// Convenience alias for results with [`OptsError`].
pub type Result<T> = std::result::Result<T, OptsError>;
