//! Error types for the inference client.

use std::time::Duration;
use thiserror::Error;

/// Result type for inference client operations.
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Inference failures.
///
/// Every variant is a failed generation: callers never receive a partially
/// assembled response alongside one of these.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Configuration error (missing token, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection refused, reset mid-stream)
    #[error("Network error: {0}")]
    Network(String),

    /// The call did not finish within its deadline
    #[error("Inference timed out after {0:?}")]
    Timeout(Duration),

    /// Backend error (non-2xx response or an in-band error event)
    #[error("Backend error: {0}")]
    Api(String),

    /// Stream could not be decoded (bad UTF-8, unparseable event)
    #[error("Malformed stream: {0}")]
    MalformedStream(String),
}

impl InferenceError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, InferenceError::Timeout(_))
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(e: reqwest::Error) -> Self {
        InferenceError::Network(e.to_string())
    }
}
