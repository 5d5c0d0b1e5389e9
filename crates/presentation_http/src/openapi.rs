//! OpenAPI documentation module
//!
//! Provides the OpenAPI 3 document for the Floodwatch HTTP API and serves
//! it through Swagger UI and ReDoc.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::{Router, response::Html, routing::get};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers, state::AppState};

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI documentation for Floodwatch
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Floodwatch API",
        description = "Flood risk assessment from drain photographs and live weather",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Liveness and readiness"),
        (name = "prediction", description = "Flood risk prediction"),
        (name = "location", description = "Reverse geocoding"),
        (name = "images", description = "Reference drain images"),
        (name = "email", description = "Transactional email alerts")
    ),
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::prediction::predict_flood,
        handlers::geocoding::reverse_geocode,
        handlers::images::random_image,
        handlers::email::send_email,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,
            handlers::health::ReadinessResponse,
            handlers::health::ModelStatusResponse,
            handlers::prediction::PredictionCoordinates,
            handlers::prediction::PredictFloodForm,
            handlers::prediction::FloodPredictionResponse,
            handlers::geocoding::ReverseGeocodeResponse,
            handlers::images::ImageResponse,
            handlers::email::SendEmailSchema,
            crate::error::ErrorResponse,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Documentation routes
///
/// - `/docs` - Swagger UI, which also serves [`OPENAPI_JSON_PATH`]
/// - `/redoc` - ReDoc
pub fn create_openapi_routes() -> Router<AppState> {
    let redoc = Redoc::with_url(OPENAPI_JSON_PATH, ApiDoc::openapi());

    Router::new()
        .route("/redoc", get(|| async move { Html(redoc.to_html()) }))
        .merge(SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}
