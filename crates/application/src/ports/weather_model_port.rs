//! Tabular weather model port

use async_trait::async_trait;
use domain::{WeatherFeatures, WeatherPrediction};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the tabular weather predictor
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherModelPort: Send + Sync {
    /// Predict weather category and precipitation from a feature row
    ///
    /// When `explain` is set, implementations that support it attach
    /// per-feature attributions to the prediction.
    async fn predict(
        &self,
        features: &WeatherFeatures,
        explain: bool,
    ) -> Result<WeatherPrediction, ApplicationError>;
}
