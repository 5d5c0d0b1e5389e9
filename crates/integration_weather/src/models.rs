//! Weatherbit API response types

use chrono::{DateTime, Datelike, Timelike, Utc};
use domain::{ObservedOutcome, StationMetadata, WeatherFeatures, WeatherInputs};
use serde::{Deserialize, Serialize};

/// Envelope of `/current`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub data: Vec<Observation>,
}

/// Weather text and icon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherDescription {
    pub description: String,
    #[serde(default)]
    pub code: Option<u32>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// One station observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub app_temp: f64,
    pub clouds: f64,
    pub dewpt: f64,
    pub dhi: f64,
    pub dni: f64,
    pub elev_angle: f64,
    pub ghi: f64,
    pub pres: f64,
    pub rh: f64,
    pub slp: f64,
    pub solar_rad: f64,
    pub temp: f64,
    pub uv: f64,
    pub vis: f64,
    pub wind_dir: f64,
    pub wind_spd: f64,
    #[serde(default)]
    pub precip: Option<f64>,
    /// Unix timestamp of the observation
    pub ts: i64,
    pub weather: WeatherDescription,
    pub timezone: String,
    #[serde(default)]
    pub sources: Vec<String>,
    pub country_code: String,
    pub city_name: String,
}

impl Observation {
    /// Observation time, `None` for out of range timestamps
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.ts, 0)
    }

    /// Flatten into a feature row
    pub(crate) fn into_features(self) -> Option<WeatherFeatures> {
        let observed_at = self.observed_at()?;

        Some(WeatherFeatures {
            inputs: WeatherInputs {
                app_temp: self.app_temp,
                clouds: self.clouds,
                dewpt: self.dewpt,
                dhi: self.dhi,
                dni: self.dni,
                elev_angle: self.elev_angle,
                ghi: self.ghi,
                pres: self.pres,
                rh: self.rh,
                slp: self.slp,
                solar_rad: self.solar_rad,
                temp: self.temp,
                uv: self.uv,
                vis: self.vis,
                wind_dir: self.wind_dir,
                wind_spd: self.wind_spd,
                hour: observed_at.hour(),
                month: observed_at.month(),
            },
            outputs: ObservedOutcome {
                weather: self.weather.description,
                // Weatherbit omits precip for some stations when it is dry
                precip: self.precip.unwrap_or(0.0),
            },
            metadata: StationMetadata {
                timezone: self.timezone,
                temp: self.temp,
                sources: self.sources,
                country_code: self.country_code,
                city_name: self.city_name,
            },
            observed_at,
        })
    }
}
