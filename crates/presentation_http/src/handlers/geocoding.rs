//! Reverse geocoding handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedQuery, state::AppState};

/// Coordinate to resolve
#[derive(Debug, Clone, Copy, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReverseGeocodeQuery {
    /// Latitude in degrees
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub lat: f64,
    /// Longitude in degrees
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub lon: f64,
}

/// City and display address of a coordinate
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"city": "Mumbai", "address": "Colaba, Mumbai, Maharashtra, India"}))]
pub struct ReverseGeocodeResponse {
    pub city: String,
    pub address: String,
}

/// Resolve a coordinate into a city and address
#[utoipa::path(
    get,
    path = "/api/v1/reverse-geocode",
    tag = "location",
    params(ReverseGeocodeQuery),
    responses(
        (status = 200, description = "Resolved place", body = ReverseGeocodeResponse),
        (status = 400, description = "Coordinates out of range", body = crate::error::ErrorResponse),
        (status = 404, description = "No place at this coordinate", body = crate::error::ErrorResponse),
        (status = 502, description = "Geocoding provider failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn reverse_geocode(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ReverseGeocodeQuery>,
) -> Result<Json<ReverseGeocodeResponse>, ApiError> {
    let place = state.geocoding.reverse_geocode(query.lat, query.lon).await?;

    Ok(Json(ReverseGeocodeResponse {
        city: place.city,
        address: place.address,
    }))
}
