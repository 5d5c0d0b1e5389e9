//! Weather feature rows consumed by the prediction pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Model input columns for one observation
///
/// Field names match the column names the tabular model was trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherInputs {
    /// Apparent temperature (°C)
    pub app_temp: f64,
    /// Cloud coverage (%)
    pub clouds: f64,
    /// Dew point (°C)
    pub dewpt: f64,
    /// Diffuse horizontal irradiance (W/m²)
    pub dhi: f64,
    /// Direct normal irradiance (W/m²)
    pub dni: f64,
    /// Solar elevation angle (degrees)
    pub elev_angle: f64,
    /// Global horizontal irradiance (W/m²)
    pub ghi: f64,
    /// Station pressure (mb)
    pub pres: f64,
    /// Relative humidity (%)
    pub rh: f64,
    /// Sea level pressure (mb)
    pub slp: f64,
    /// Estimated solar radiation (W/m²)
    pub solar_rad: f64,
    /// Temperature (°C)
    pub temp: f64,
    /// UV index
    pub uv: f64,
    /// Visibility (km)
    pub vis: f64,
    /// Wind direction (degrees)
    pub wind_dir: f64,
    /// Wind speed (m/s)
    pub wind_spd: f64,
    /// Hour of observation (UTC, 0-23)
    pub hour: u32,
    /// Month of observation (1-12)
    pub month: u32,
}

impl WeatherInputs {
    /// Default column order of the tabular model
    pub const COLUMNS: [&'static str; 18] = [
        "app_temp",
        "clouds",
        "dewpt",
        "dhi",
        "dni",
        "elev_angle",
        "ghi",
        "pres",
        "rh",
        "slp",
        "solar_rad",
        "temp",
        "uv",
        "vis",
        "wind_dir",
        "wind_spd",
        "hour",
        "month",
    ];

    /// Look up a column by name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<f64> {
        let value = match name {
            "app_temp" => self.app_temp,
            "clouds" => self.clouds,
            "dewpt" => self.dewpt,
            "dhi" => self.dhi,
            "dni" => self.dni,
            "elev_angle" => self.elev_angle,
            "ghi" => self.ghi,
            "pres" => self.pres,
            "rh" => self.rh,
            "slp" => self.slp,
            "solar_rad" => self.solar_rad,
            "temp" => self.temp,
            "uv" => self.uv,
            "vis" => self.vis,
            "wind_dir" => self.wind_dir,
            "wind_spd" => self.wind_spd,
            "hour" => f64::from(self.hour),
            "month" => f64::from(self.month),
            _ => return None,
        };
        Some(value)
    }

    /// Values in the order given by `columns`
    ///
    /// Returns the name of the first unknown column on failure.
    pub fn row<S: AsRef<str>>(&self, columns: &[S]) -> Result<Vec<f64>, String> {
        columns
            .iter()
            .map(|c| self.column(c.as_ref()).ok_or_else(|| c.as_ref().to_string()))
            .collect()
    }
}

/// Observed outcome columns (the targets of the tabular model)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedOutcome {
    /// Weather category description (e.g. "Light rain")
    pub weather: String,
    /// Precipitation rate (mm/hr)
    pub precip: f64,
}

/// Station metadata accompanying an observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationMetadata {
    pub timezone: String,
    pub temp: f64,
    #[serde(default)]
    pub sources: Vec<String>,
    pub country_code: String,
    pub city_name: String,
}

/// One flattened weather observation for a location and time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherFeatures {
    pub inputs: WeatherInputs,
    pub outputs: ObservedOutcome,
    pub metadata: StationMetadata,
    pub observed_at: DateTime<Utc>,
}

impl WeatherFeatures {
    /// Relative humidity of the observation
    #[must_use]
    pub const fn humidity(&self) -> f64 {
        self.inputs.rh
    }
}

/// Attribution score of one input feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureAttribution {
    pub feature: String,
    pub value: f64,
}

/// Output of the tabular weather predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPrediction {
    /// Predicted weather category
    pub weather: String,
    /// Predicted precipitation (mm/hr)
    pub precip: f64,
    /// Feature attributions when explanation was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributions: Option<Vec<FeatureAttribution>>,
}

impl WeatherPrediction {
    /// Prediction that echoes an observation
    #[must_use]
    pub fn from_observed(observed: &ObservedOutcome) -> Self {
        Self {
            weather: observed.weather.clone(),
            precip: observed.precip,
            attributions: None,
        }
    }
}
