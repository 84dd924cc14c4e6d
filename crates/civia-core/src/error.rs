//! Error types for CIVIA

use thiserror::Error;

/// CIVIA error type
#[derive(Error, Debug)]
pub enum Error {
    /// Input that is not numerically well-formed (negative or non-finite
    /// concentration, bad axis spec, bad parameter record, unknown preset).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// eMAC is undefined: P saturated to 1.0 or eMAC is not finite.
    #[error("Numeric degenerate: {0}")]
    NumericDegenerate(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
