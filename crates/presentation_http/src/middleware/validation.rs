//! Request validation
//!
//! `ValidatedJson` and `ValidatedQuery` deserialize like their axum
//! counterparts and then run the `validator` rules of the target type.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::error::ErrorResponse;

/// Validation error type
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("Invalid query: {0}")]
    QueryError(#[from] QueryRejection),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string);
                    format!("{field}: {message}")
                })
            })
            .collect();
        // HashMap order is unstable
        messages.sort();

        Self::ValidationFailed(messages.join("; "))
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let error = match self {
            Self::JsonError(e) => e.body_text(),
            Self::QueryError(e) => e.body_text(),
            Self::ValidationFailed(msg) => msg,
        };

        let body = ErrorResponse {
            error,
            code: "validation_error".to_string(),
            details: None,
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// A JSON extractor that also validates the request body
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct Body {
///     #[validate(length(min = 1))]
///     recipients: Vec<Value>,
/// }
///
/// async fn handler(ValidatedJson(body): ValidatedJson<Body>) {}
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// A query string extractor that also validates the parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}
