//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{handlers, middleware::RequestIdLayer, openapi, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let predict = post(handlers::prediction::predict_flood)
        .layer(DefaultBodyLimit::max(state.upload_limit));

    // Existing clients post to the slash-terminated path
    let api = Router::new()
        .route("/predict-flood", predict.clone())
        .route("/predict-flood/", predict)
        .route("/reverse-geocode", get(handlers::geocoding::reverse_geocode))
        .route("/get-latest-s3-image", get(handlers::images::random_image))
        .route("/send-email", post(handlers::email::send_email));

    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .nest("/api/v1", api)
        .merge(openapi::create_openapi_routes())
        .layer(RequestIdLayer::new())
        .with_state(state)
}
