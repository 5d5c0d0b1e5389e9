//! API error handling
//!
//! Maps application errors to HTTP responses. In production mode internal
//! details are withheld and upstream messages are sanitized, since
//! provider errors can echo request URLs that carry API keys.

use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Global flag to control error detail exposure
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

const GENERIC_MESSAGE: &str = "An error occurred processing your request";

/// Configure whether internal error details should be exposed in responses.
///
/// Production deployments set this to `false`.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// Replace messages that look like they leak paths, URLs or credentials
fn sanitize_error_message(msg: &str) -> String {
    if should_expose_details() {
        return msg.to_string();
    }

    let sensitive_patterns = [
        // File paths
        "/home/",
        "/users/",
        "/var/",
        "/etc/",
        "/app/",
        "\\users\\",
        "c:\\",
        // Credentials in URLs and headers
        "key=",
        "authkey",
        "secret",
        "token",
        "amazonaws.com",
        // Stack trace indicators
        "stack backtrace",
        "panicked at",
        ".rs:",
        // Connection details
        "connection refused",
        "econnrefused",
        "dns error",
    ];

    let msg_lower = msg.to_lowercase();
    if sensitive_patterns.iter().any(|p| msg_lower.contains(p)) || msg.contains("://") {
        return GENERIC_MESSAGE.to_string();
    }

    msg.to_string()
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request failed a domain rule
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// An upstream provider failed
    #[error("Upstream error: {0}")]
    BadGateway(String),

    /// Prediction backends or an optional integration are not available
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Machine readable error code
    pub code: String,
    /// Additional error details (development only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                sanitize_error_message(&msg),
                None,
            ),
            Self::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                sanitize_error_message(&msg),
                None,
            ),
            Self::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "not_found",
                sanitize_error_message(&msg),
                None,
            ),
            Self::BadGateway(msg) => {
                let message = if should_expose_details() {
                    msg
                } else {
                    "Upstream service failed".to_string()
                };
                (StatusCode::BAD_GATEWAY, "service_unavailable", message, None)
            },
            Self::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                sanitize_error_message(&msg),
                None,
            ),
            Self::Internal(msg) => {
                let details = should_expose_details().then_some(msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    details,
                )
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::Validation(e.to_string()),
            ApplicationError::InvalidInput(msg) => Self::BadRequest(msg),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::ExternalService(msg) => Self::BadGateway(msg),
            ApplicationError::ModelUnavailable(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}
