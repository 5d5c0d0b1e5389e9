//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Input outside the domain of an operation
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Latitude or longitude out of range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}
