//! Geocoding adapter - Implements GeocodingPort using integration_geocoding

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{GeocodingPort, Place};
use async_trait::async_trait;
use domain::GeoLocation;
use integration_geocoding::{
    GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient,
};
use tracing::{debug, instrument};

/// Adapter for Nominatim reverse geocoding
pub struct GeocodingAdapter {
    client: Arc<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"GeocodingClient")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create an adapter backed by the Nominatim client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: &NominatimConfig) -> Result<Self, ApplicationError> {
        let client = NominatimGeocodingClient::new(config)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create an adapter around an existing client
    pub fn with_client(client: Arc<dyn GeocodingClient>) -> Self {
        Self { client }
    }

    fn map_error(err: GeocodingError) -> ApplicationError {
        match err {
            GeocodingError::ConnectionFailed(e) | GeocodingError::RequestFailed(e) => {
                ApplicationError::ExternalService(e)
            },
            GeocodingError::ParseError(e) => {
                ApplicationError::ExternalService(format!("Malformed geocoding response: {e}"))
            },
            GeocodingError::RateLimitExceeded => {
                ApplicationError::ExternalService("Geocoding rate limit exceeded".into())
            },
            GeocodingError::Timeout => {
                ApplicationError::ExternalService("Geocoding request timed out".into())
            },
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self), fields(location = %location))]
    async fn reverse_geocode(
        &self,
        location: &GeoLocation,
    ) -> Result<Option<Place>, ApplicationError> {
        let place = self
            .client
            .reverse_geocode(location)
            .await
            .map_err(Self::map_error)?;

        debug!(found = place.is_some(), "Reverse geocoding finished");

        Ok(place.map(|p| Place {
            city: p.city,
            address: p.address,
        }))
    }
}
