//! Weather adapter - Implements WeatherPort using integration_weather

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::WeatherPort;
use async_trait::async_trait;
use domain::{GeoLocation, WeatherFeatures};
use integration_weather::{WeatherClient, WeatherConfig, WeatherError, WeatherbitClient};
use tracing::{debug, instrument};

/// Adapter for the Weatherbit current conditions API
pub struct WeatherAdapter {
    client: Arc<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"WeatherClient")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create an adapter backed by the Weatherbit HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client =
            WeatherbitClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create an adapter around an existing client
    pub fn with_client(client: Arc<dyn WeatherClient>) -> Self {
        Self { client }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            WeatherError::ParseError(e) => {
                ApplicationError::ExternalService(format!("Malformed weather response: {e}"))
            },
            WeatherError::Unauthorized(e) => {
                ApplicationError::Configuration(format!("Weather API rejected credentials: {e}"))
            },
            WeatherError::InvalidCoordinates => {
                ApplicationError::InvalidInput("Invalid coordinates".into())
            },
            WeatherError::RateLimitExceeded => {
                ApplicationError::ExternalService("Weather API rate limit exceeded".into())
            },
            WeatherError::Timeout => {
                ApplicationError::ExternalService("Weather request timed out".into())
            },
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn current_features(
        &self,
        location: &GeoLocation,
    ) -> Result<WeatherFeatures, ApplicationError> {
        let features = self
            .client
            .current_features(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error)?;

        debug!(
            weather = %features.outputs.weather,
            precip = features.outputs.precip,
            "Fetched current weather features"
        );

        Ok(features)
    }
}
