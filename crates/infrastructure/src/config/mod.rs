//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server and logging settings
//! - `integrations`: Weatherbit, Nominatim, MSG91, S3
//!
//! Model serving settings reuse [`ai_core::ModelServingConfig`].

mod integrations;
mod server;

use std::fmt;

use ai_core::ModelServingConfig;
use serde::{Deserialize, Serialize};

pub use integrations::{EmailAppConfig, GeocodingAppConfig, StorageAppConfig, WeatherAppConfig};
pub use server::{LogFormat, LoggingConfig, ServerConfig};

use crate::validation::{SecurityValidator, SecurityWarning};

/// Prefix of the environment variables overriding configuration values
pub const ENV_PREFIX: &str = "FLOODWATCH";

/// Application environment (development or production)
///
/// Controls validation strictness and error exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - relaxed warnings, detailed errors
    #[default]
    Development,
    /// Production environment - strict validation, sanitised errors
    Production,
}

impl Environment {
    /// Whether this is the production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Weatherbit configuration
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Nominatim configuration
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// MSG91 configuration
    #[serde(default)]
    pub email: EmailAppConfig,

    /// Reference image bucket
    #[serde(default)]
    pub storage: StorageAppConfig,

    /// Model server and artifacts
    #[serde(default)]
    pub models: ModelServingConfig,
}

impl AppConfig {
    /// Load configuration from an optional `config.toml` and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(config::File::with_name("config").required(false))
    }

    /// Load configuration from the given file source, then the environment
    ///
    /// Environment variables use a double underscore separator, e.g.
    /// `FLOODWATCH__SERVER__PORT=8080` or `FLOODWATCH__WEATHER__API_KEY=...`.
    pub fn load_from<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .with_list_parse_key("models.input_columns")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Check the configuration for missing secrets and risky settings
    ///
    /// Warnings are sorted critical first.
    #[must_use]
    pub fn validate(&self) -> Vec<SecurityWarning> {
        SecurityValidator::validate(self)
    }
}
