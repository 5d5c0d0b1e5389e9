//! Flood prediction handler
//!
//! Accepts a multipart upload with an `image` file part and a `request`
//! text part holding `{"lon": .., "lat": ..}`.

use application::{FloodAssessment, FloodPredictionRequest};
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
};
use bytes::Bytes;
use domain::{FeatureAttribution, ObservedOutcome, RiskVerdict, StationMetadata, WeatherInputs};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::{error::ApiError, state::AppState};

const IMAGE_FIELD: &str = "image";
const REQUEST_FIELD: &str = "request";

/// Coordinates sent in the `request` form field
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[schema(example = json!({"lon": 72.8777, "lat": 19.076}))]
pub struct PredictionCoordinates {
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
}

/// Multipart form accepted by the prediction endpoint (documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct PredictFloodForm {
    /// Drain photograph (JPEG, PNG, GIF, BMP or WebP)
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    /// JSON encoded [`PredictionCoordinates`]
    #[schema(example = r#"{"lon": 72.8777, "lat": 19.076}"#)]
    pub request: String,
}

/// Flood prediction with every intermediate model output
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FloodPredictionResponse {
    /// File name of the uploaded image
    pub image: String,
    pub longitude: f64,
    pub latitude: f64,
    /// `{flood_risk, reason, debug?}`
    #[schema(value_type = Object)]
    pub prediction: RiskVerdict,
    /// Weather model input row
    #[schema(value_type = Object)]
    pub weather_data: WeatherInputs,
    /// Predicted `{weather, precip}`
    #[schema(value_type = Object)]
    pub weather_prediction: ObservedOutcome,
    /// Station metadata of the observation
    #[schema(value_type = Object)]
    pub weather_metadata: StationMetadata,
    /// Per-feature attributions of the weather model
    #[schema(value_type = Option<Vec<Object>>)]
    pub weather_shap_value: Option<Vec<FeatureAttribution>>,
    /// Blockage class index (0 full, 1 none, 2 partial)
    pub drain_blockage: u8,
    /// Probability of the predicted blockage class
    pub drain_blockage_prob: f64,
    /// Per-class attributions of the blockage classifier
    #[serde(rename = "drain_blockage_shape_value")]
    pub drain_blockage_shap_value: Option<Vec<f64>>,
}

impl From<FloodAssessment> for FloodPredictionResponse {
    fn from(assessment: FloodAssessment) -> Self {
        Self {
            image: assessment.filename,
            longitude: assessment.location.longitude(),
            latitude: assessment.location.latitude(),
            prediction: assessment.verdict,
            weather_data: assessment.features.inputs,
            weather_prediction: ObservedOutcome {
                weather: assessment.weather.weather,
                precip: assessment.weather.precip,
            },
            weather_metadata: assessment.features.metadata,
            weather_shap_value: assessment.weather.attributions,
            drain_blockage: assessment.blockage.state.class_index(),
            drain_blockage_prob: assessment.blockage.confidence,
            drain_blockage_shap_value: assessment.blockage.attributions,
        }
    }
}

/// Predict the flood risk for a drain photo at a coordinate
#[utoipa::path(
    post,
    path = "/api/v1/predict-flood",
    tag = "prediction",
    request_body(content = PredictFloodForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Flood risk assessment", body = FloodPredictionResponse),
        (status = 400, description = "Invalid upload or coordinates", body = crate::error::ErrorResponse),
        (status = 413, description = "Upload exceeds the size limit"),
        (status = 502, description = "Weather provider or model server failed", body = crate::error::ErrorResponse),
        (status = 503, description = "Prediction models are not loaded", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, multipart))]
pub async fn predict_flood(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FloodPredictionResponse>, ApiError> {
    let request = read_form(multipart).await?;
    debug!(
        filename = %request.filename,
        bytes = request.image.len(),
        "Received prediction upload"
    );

    let assessment = state.prediction.assess(request).await?;
    Ok(Json(assessment.into()))
}

async fn read_form(mut multipart: Multipart) -> Result<FloodPredictionRequest, ApiError> {
    let mut image: Option<(String, Bytes)> = None;
    let mut coordinates: Option<PredictionCoordinates> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some(IMAGE_FIELD) => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                image = Some((filename, bytes));
            },
            Some(REQUEST_FIELD) => {
                let text = field.text().await.map_err(multipart_error)?;
                let parsed = serde_json::from_str(&text).map_err(|e| {
                    ApiError::BadRequest(format!("Field '{REQUEST_FIELD}' is not valid JSON: {e}"))
                })?;
                coordinates = Some(parsed);
            },
            _ => {},
        }
    }

    let (filename, image) = image
        .ok_or_else(|| ApiError::BadRequest(format!("Missing form field '{IMAGE_FIELD}'")))?;
    let coordinates = coordinates
        .ok_or_else(|| ApiError::BadRequest(format!("Missing form field '{REQUEST_FIELD}'")))?;

    Ok(FloodPredictionRequest {
        image,
        filename,
        latitude: coordinates.lat,
        longitude: coordinates.lon,
    })
}

fn multipart_error(err: MultipartError) -> ApiError {
    ApiError::BadRequest(err.body_text())
}
