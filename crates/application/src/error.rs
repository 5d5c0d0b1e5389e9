//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Caller supplied an unusable request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Prediction models are missing or not serving
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicationError::ExternalService(_) | ApplicationError::ModelUnavailable(_)
        )
    }

    /// Check if the caller is responsible for this error
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ApplicationError::Domain(_) | ApplicationError::InvalidInput(_)
        )
    }
}
