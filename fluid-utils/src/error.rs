//! Error types for selector parsing and serialization.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a label selector.
#[derive(Debug, Error)]
pub enum Error {
    /// A requirement has no key before the `=`.
    #[error("empty key in selector requirement {position}")]
    EmptyKey { position: usize },

    /// A requirement is not of the form `key=value`.
    #[error("missing '=' in selector requirement: {0}")]
    MissingSeparator(String),

    /// A key is empty, has surrounding whitespace, or contains `=` or `,`.
    #[error("invalid selector key: {0:?}")]
    InvalidKey(String),

    /// A value has surrounding whitespace or contains `,`.
    #[error("invalid value for selector key {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    /// The same key is required more than once.
    #[error("duplicate key in selector: {0}")]
    DuplicateKey(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
