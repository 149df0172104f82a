//! Error types for fetch and analysis operations.
//!
//! This module defines [`FactsError`], covering everything that can abort a run:
//! transport failures, unknown tickers and malformed payloads. A concept that is
//! absent from a payload is deliberately *not* an error.

use thiserror::Error;

/// Errors that can occur while fetching or analysing company facts.
#[derive(Error, Debug)]
pub enum FactsError {
    /// Network-related errors (connection failures, non-success HTTP status).
    #[error("Network error: {0}")]
    Network(String),

    /// The requested ticker symbol was not found in the lookup table.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No company facts are available for the identifier.
    #[error("No company facts for CIK {0}")]
    FactsNotFound(String),

    /// Error parsing data from a provider.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error building or reading a tabular frame.
    #[error("Frame error: {0}")]
    Frame(String),

    /// Error reading a saved document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for FactsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type alias using [`FactsError`].
pub type Result<T> = std::result::Result<T, FactsError>;
