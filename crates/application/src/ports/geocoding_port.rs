//! Reverse geocoding port

use async_trait::async_trait;
use domain::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Place resolved for a coordinate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// City (or town/village) name
    pub city: Option<String>,
    /// Full display address
    pub address: Option<String>,
}

/// Port for reverse geocoding
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a coordinate to a place, `None` if nothing is there
    async fn reverse_geocode(
        &self,
        location: &GeoLocation,
    ) -> Result<Option<Place>, ApplicationError>;
}
