//! Reference image handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::{error::ApiError, state::AppState};

/// Base64 encoded image
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    /// Standard base64 of the image bytes
    pub image_base64: String,
}

/// Fetch a random reference image of an unblocked drain
#[utoipa::path(
    get,
    path = "/api/v1/get-latest-s3-image",
    tag = "images",
    responses(
        (status = 200, description = "Random reference image", body = ImageResponse),
        (status = 404, description = "No images in the library", body = crate::error::ErrorResponse),
        (status = 502, description = "Object storage failed", body = crate::error::ErrorResponse),
        (status = 503, description = "Object storage is not configured", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn random_image(State(state): State<AppState>) -> Result<Json<ImageResponse>, ApiError> {
    let images = state.images.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("Image storage is not configured".to_string())
    })?;

    let image_base64 = images.random_image_base64().await?;
    Ok(Json(ImageResponse { image_base64 }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_uses_camel_case_key() {
        let json = serde_json::to_value(ImageResponse {
            image_base64: "aGVsbG8=".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"imageBase64": "aGVsbG8="}));
    }
}
