//! Reverse geocoding service

use std::{fmt, sync::Arc};

use domain::GeoLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::GeocodingPort};

/// City and address for a coordinate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseGeocode {
    pub city: String,
    pub address: String,
}

/// Resolves coordinates into a city and a display address
pub struct GeocodingService {
    geocoder: Arc<dyn GeocodingPort>,
}

impl fmt::Debug for GeocodingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocodingService").finish_non_exhaustive()
    }
}

impl GeocodingService {
    pub fn new(geocoder: Arc<dyn GeocodingPort>) -> Self {
        Self { geocoder }
    }

    /// Reverse geocode a coordinate
    ///
    /// Fails with `NotFound` unless both a city and an address are known.
    #[instrument(skip(self))]
    pub async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ReverseGeocode, ApplicationError> {
        let location = GeoLocation::new(latitude, longitude)
            .map_err(|e| ApplicationError::InvalidInput(e.to_string()))?;

        let place = self.geocoder.reverse_geocode(&location).await?;
        debug!(?place, "Geocoder answered");

        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        match place {
            Some(place) => match (non_empty(place.city), non_empty(place.address)) {
                (Some(city), Some(address)) => Ok(ReverseGeocode { city, address }),
                _ => Err(ApplicationError::NotFound(format!(
                    "City or address not found for {location}"
                ))),
            },
            None => Err(ApplicationError::NotFound(format!(
                "No place found for {location}"
            ))),
        }
    }
}
