//! Weatherbit weather integration
//!
//! Client for the Weatherbit current conditions API (<https://www.weatherbit.io>).
//! Observations are flattened into the feature rows used by the flood models.

pub mod client;
mod models;

pub use client::{WeatherClient, WeatherConfig, WeatherError, WeatherbitClient};
pub use models::{ApiResponse, Observation, WeatherDescription};
