//! Test fixtures for weather feature rows.
//!
//! Provides a builder for creating observation data.

use chrono::{TimeZone, Utc};
use domain::{ObservedOutcome, StationMetadata, WeatherFeatures, WeatherInputs};

/// Builder for creating test weather features.
#[derive(Debug, Clone)]
pub struct TestFeatures {
    weather: String,
    precip: f64,
    rh: f64,
}

impl TestFeatures {
    /// A humid monsoon afternoon with heavy rain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            weather: "Heavy rain".to_string(),
            precip: 15.0,
            rh: 88.0,
        }
    }

    /// Set the observed weather description.
    #[must_use]
    pub fn with_weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = weather.into();
        self
    }

    /// Set the observed precipitation.
    #[must_use]
    pub const fn with_precip(mut self, precip: f64) -> Self {
        self.precip = precip;
        self
    }

    /// Set the relative humidity.
    #[must_use]
    pub const fn with_humidity(mut self, rh: f64) -> Self {
        self.rh = rh;
        self
    }

    /// Build the feature row.
    #[must_use]
    pub fn build(self) -> WeatherFeatures {
        WeatherFeatures {
            inputs: WeatherInputs {
                app_temp: 29.0,
                clouds: 90.0,
                dewpt: 23.0,
                dhi: 80.0,
                dni: 500.0,
                elev_angle: 30.0,
                ghi: 400.0,
                pres: 1002.0,
                rh: self.rh,
                slp: 1005.0,
                solar_rad: 200.0,
                temp: 26.0,
                uv: 3.0,
                vis: 4.0,
                wind_dir: 200.0,
                wind_spd: 6.0,
                hour: 14,
                month: 8,
            },
            outputs: ObservedOutcome {
                weather: self.weather,
                precip: self.precip,
            },
            metadata: StationMetadata {
                timezone: "Asia/Kolkata".to_string(),
                temp: 26.0,
                sources: vec!["analysis".to_string()],
                country_code: "IN".to_string(),
                city_name: "Mumbai".to_string(),
            },
            observed_at: Utc.with_ymd_and_hms(2024, 8, 1, 14, 0, 0).unwrap(),
        }
    }
}

impl Default for TestFeatures {
    fn default() -> Self {
        Self::new()
    }
}
