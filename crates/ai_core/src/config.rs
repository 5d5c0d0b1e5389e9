//! Configuration for the model serving boundary

use std::path::PathBuf;

use domain::WeatherInputs;
use serde::{Deserialize, Serialize};

/// Where weather predictions come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherModelMode {
    /// Echo the observed weather and precipitation
    #[default]
    Observed,
    /// Ask the tabular model on the model server
    Remote,
}

/// Configuration for the model server and model artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelServingConfig {
    /// Base URL of the TF-Serving compatible REST server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Name of the drain blockage classifier
    #[serde(default = "default_blockage_model")]
    pub blockage_model: String,

    /// Name of the tabular weather model
    #[serde(default = "default_weather_model")]
    pub weather_model: String,

    /// Weather prediction source
    #[serde(default)]
    pub weather_mode: WeatherModelMode,

    /// Path of the feature scaler artifact (JSON)
    #[serde(default = "default_scaler_path")]
    pub scaler_path: PathBuf,

    /// Feature columns fed to the weather model, in order
    #[serde(default = "default_input_columns")]
    pub input_columns: Vec<String>,
}

fn default_base_url() -> String {
    "http://localhost:8501".to_string()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

fn default_blockage_model() -> String {
    "drain_blockage".to_string()
}

fn default_weather_model() -> String {
    "weather".to_string()
}

fn default_scaler_path() -> PathBuf {
    PathBuf::from("ml_models/scaler.json")
}

fn default_input_columns() -> Vec<String> {
    WeatherInputs::COLUMNS.iter().map(ToString::to_string).collect()
}

impl Default for ModelServingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            blockage_model: default_blockage_model(),
            weather_model: default_weather_model(),
            weather_mode: WeatherModelMode::default(),
            scaler_path: default_scaler_path(),
            input_columns: default_input_columns(),
        }
    }
}
