//! Geographic location value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A geographic location with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if either value is not finite,
    /// latitude is not in [-90, 90] or longitude is not in [-180, 180]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidCoordinates(format!(
                "latitude {latitude} must be between -90 and 90"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates(format!(
                "longitude {longitude} must be between -180 and 180"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Stable key for caching lookups at roughly one-metre resolution
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{:.5},{:.5}", self.latitude, self.longitude)
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
