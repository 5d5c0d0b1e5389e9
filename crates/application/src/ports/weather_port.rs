//! Weather service port
//!
//! Defines the interface for retrieving current weather features.

use async_trait::async_trait;
use domain::{GeoLocation, WeatherFeatures};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for weather data retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Fetch the current observation for a location as a feature row
    async fn current_features(
        &self,
        location: &GeoLocation,
    ) -> Result<WeatherFeatures, ApplicationError>;
}
