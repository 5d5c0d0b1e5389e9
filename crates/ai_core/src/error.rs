//! Model serving errors

use thiserror::Error;

/// Errors that can occur while talking to the model server or loading artifacts
#[derive(Debug, Error)]
pub enum ModelServingError {
    /// Failed to connect to the model server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the model server failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Model not found or not loaded
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Response parsing failed or the output has the wrong shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during prediction
    #[error("Prediction timed out")]
    Timeout,

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),

    /// Startup artifact missing or malformed
    #[error("Artifact error: {0}")]
    Artifact(String),
}

impl From<reqwest::Error> for ModelServingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ModelServingError::Timeout
        } else if err.is_connect() {
            ModelServingError::ConnectionFailed(err.to_string())
        } else {
            ModelServingError::RequestFailed(err.to_string())
        }
    }
}
