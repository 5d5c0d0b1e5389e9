//! Health check handlers

use application::ModelStatus;
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    /// Whether flood predictions can be served
    pub ready: bool,
    /// Whether the model artifacts were loaded at startup
    pub models_loaded: bool,
    pub models: Vec<ModelStatusResponse>,
}

/// Serving status of one model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelStatusResponse {
    pub name: String,
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<ModelStatus> for ModelStatusResponse {
    fn from(status: ModelStatus) -> Self {
        Self {
            name: status.name,
            ready: status.ready,
            detail: status.detail,
        }
    }
}

/// Readiness check - can the server answer flood predictions?
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Models loaded and serving", body = ReadinessResponse),
        (status = 503, description = "Models not loaded or not serving", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let report = state.health.readiness().await;

    let status_code = if report.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready: report.ready,
            models_loaded: report.models_loaded,
            models: report.models.into_iter().map(Into::into).collect(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_crate_version() {
        let Json(resp) = health_check().await;
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn model_status_conversion_keeps_detail() {
        let resp: ModelStatusResponse = ModelStatus::unavailable("drain_blockage", "LOADING").into();
        assert!(!resp.ready);
        assert_eq!(resp.detail.as_deref(), Some("LOADING"));

        let json = serde_json::to_value(ModelStatusResponse::from(ModelStatus::ready("x"))).unwrap();
        assert!(json.get("detail").is_none());
    }
}
