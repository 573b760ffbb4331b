//! Marketplace error types.

use thiserror::Error;

/// Errors that can occur at the boundaries of the listing core.
///
/// The pure search functions never return these; they show up where a
/// collaborator (product source, suggestion backend, config file) hands
/// data to the core.
#[derive(Error, Debug)]
pub enum MarketError {
    /// A catalog entry failed boundary validation.
    #[error("Invalid product at index {index}: {reason}")]
    InvalidProduct { index: usize, reason: String },

    /// The product source could not be read.
    #[error("Failed to read product source {path}: {message}")]
    SourceIo { path: String, message: String },

    /// The suggestion backend failed.
    #[error("Suggestion backend error: {0}")]
    SuggestionBackend(String),

    /// Configuration value out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MarketError {
    fn from(e: serde_json::Error) -> Self {
        MarketError::SerializationError(e.to_string())
    }
}
