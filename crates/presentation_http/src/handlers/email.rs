//! Email handler
//!
//! The body is an MSG91 email payload and is forwarded unchanged.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// MSG91 email payload
///
/// Only `recipients` is checked, every other field passes through.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendEmailRequest {
    #[validate(length(min = 1, message = "must contain at least one recipient"))]
    pub recipients: Vec<Value>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Documented shape of [`SendEmailRequest`]
#[derive(Debug, ToSchema)]
#[schema(example = json!({
    "recipients": [{"to": [{"email": "ops@example.com", "name": "Ops"}]}],
    "from": {"email": "alerts@example.com"},
    "domain": "example.com",
    "template_id": "flood_alert"
}))]
#[allow(dead_code)]
pub struct SendEmailSchema {
    /// MSG91 recipient blocks, at least one
    #[schema(value_type = Vec<Object>)]
    pub recipients: Vec<Value>,
}

impl SendEmailRequest {
    fn into_payload(self) -> Value {
        let mut payload = self.rest;
        payload.insert("recipients".to_string(), Value::Array(self.recipients));
        Value::Object(payload)
    }
}

/// Send a transactional email through MSG91
#[utoipa::path(
    post,
    path = "/api/v1/send-email",
    tag = "email",
    request_body(content = SendEmailSchema, description = "MSG91 email payload, extra fields pass through"),
    responses(
        (status = 200, description = "MSG91 response, passed through"),
        (status = 400, description = "Missing or empty recipients", body = crate::error::ErrorResponse),
        (status = 502, description = "MSG91 rejected the request", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(recipients = request.recipients.len()))]
pub async fn send_email(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SendEmailRequest>,
) -> Result<Json<Value>, ApiError> {
    let response = state.email.send(request.into_payload()).await?;
    Ok(Json(response))
}
