//! Nominatim reverse geocoding integration
//!
//! Resolves coordinates to a city and display address using the
//! [Nominatim](https://nominatim.openstreetmap.org) API (OpenStreetMap).

mod client;

pub use client::{
    GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient, ReversePlace,
};
