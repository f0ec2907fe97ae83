//! Error types for filing digest operations.
//!
//! This module defines [`FilingError`] which covers the error cases that can
//! occur when fetching filing indexes and documents or decoding SEC payloads.

use thiserror::Error;

/// Errors that can occur during filing digest operations.
#[derive(Error, Debug)]
pub enum FilingError {
    /// Network-related errors (connection failures, timeouts, non-success
    /// responses from endpoints that must succeed).
    #[error("Network error: {0}")]
    Network(String),

    /// Error decoding a payload from the disclosure source.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The requested ticker symbol has no known filer identifier.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`FilingError`].
pub type Result<T> = std::result::Result<T, FilingError>;
