//! Flood prediction orchestrator
//!
//! Runs the weather fetch, the tabular weather model and the blockage
//! classifier for one upload, then feeds their outputs to the flood-risk
//! heuristic.

use std::{fmt, sync::Arc};

use bytes::Bytes;
use domain::{
    BlockagePrediction, GeoLocation, RiskVerdict, WeatherFeatures, WeatherPrediction, evaluate,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    image_format::ImageFormat,
    ports::{BlockageClassifierPort, ModelStatusPort, WeatherModelPort, WeatherPort},
};

/// Default upper bound for uploaded images (10 MiB)
const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Orchestrator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloodPredictionConfig {
    /// Largest accepted image in bytes
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
    /// Request feature attributions from the weather model
    #[serde(default = "default_explain")]
    pub explain_weather: bool,
}

const fn default_max_image_bytes() -> usize {
    DEFAULT_MAX_IMAGE_BYTES
}

const fn default_explain() -> bool {
    true
}

impl Default for FloodPredictionConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            explain_weather: default_explain(),
        }
    }
}

/// One prediction request
#[derive(Debug, Clone)]
pub struct FloodPredictionRequest {
    /// Raw uploaded image
    pub image: Bytes,
    /// Client-side file name of the upload
    pub filename: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Everything produced while assessing one upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloodAssessment {
    pub filename: String,
    pub location: GeoLocation,
    pub features: WeatherFeatures,
    pub weather: WeatherPrediction,
    pub blockage: BlockagePrediction,
    pub verdict: RiskVerdict,
}

/// Flood prediction service
pub struct FloodPredictionService {
    weather: Arc<dyn WeatherPort>,
    weather_model: Arc<dyn WeatherModelPort>,
    classifier: Arc<dyn BlockageClassifierPort>,
    models: Arc<dyn ModelStatusPort>,
    config: FloodPredictionConfig,
}

impl fmt::Debug for FloodPredictionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloodPredictionService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FloodPredictionService {
    /// Create a new flood prediction service
    pub fn new(
        weather: Arc<dyn WeatherPort>,
        weather_model: Arc<dyn WeatherModelPort>,
        classifier: Arc<dyn BlockageClassifierPort>,
        models: Arc<dyn ModelStatusPort>,
        config: FloodPredictionConfig,
    ) -> Self {
        Self {
            weather,
            weather_model,
            classifier,
            models,
            config,
        }
    }

    /// Assess the flood risk for a drain photo taken at a coordinate
    #[instrument(skip(self, request), fields(filename = %request.filename, bytes = request.image.len()))]
    pub async fn assess(
        &self,
        request: FloodPredictionRequest,
    ) -> Result<FloodAssessment, ApplicationError> {
        let location = GeoLocation::new(request.latitude, request.longitude)
            .map_err(|e| ApplicationError::InvalidInput(e.to_string()))?;
        let format = self.validate_image(&request.image)?;
        debug!(%format, "Accepted upload");

        if !self.models.is_loaded() {
            warn!("Prediction requested before models were loaded");
            return Err(ApplicationError::ModelUnavailable(
                "Prediction models are not loaded".to_string(),
            ));
        }

        let features = self.weather.current_features(&location).await?;
        let weather = self
            .weather_model
            .predict(&features, self.config.explain_weather)
            .await?;
        let blockage = self.classifier.classify(&request.image).await?;

        let verdict = evaluate(
            weather.precip,
            &weather.weather,
            blockage.state.class_index(),
            blockage.confidence,
            features.humidity(),
        )
        .map_err(|e| {
            ApplicationError::ExternalService(format!("Model output rejected by risk engine: {e}"))
        })?;

        info!(
            %location,
            risk = %verdict.risk_label,
            blockage = %blockage.state,
            weather = %weather.weather,
            "Flood risk assessed"
        );

        Ok(FloodAssessment {
            filename: request.filename,
            location,
            features,
            weather,
            blockage,
            verdict,
        })
    }

    fn validate_image(&self, image: &[u8]) -> Result<ImageFormat, ApplicationError> {
        if image.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "Uploaded image is empty".to_string(),
            ));
        }
        if image.len() > self.config.max_image_bytes {
            return Err(ApplicationError::InvalidInput(format!(
                "Uploaded image is {} bytes, limit is {}",
                image.len(),
                self.config.max_image_bytes
            )));
        }
        ImageFormat::sniff(image).ok_or_else(|| {
            ApplicationError::InvalidInput(
                "Uploaded file is not a JPEG, PNG, GIF, BMP or WebP image".to_string(),
            )
        })
    }
}
