//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! integration crates, and owns configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod logging;
#[cfg(test)]
pub mod testing;
pub mod validation;

pub use adapters::*;
pub use config::{
    AppConfig, EmailAppConfig, Environment, GeocodingAppConfig, LogFormat, LoggingConfig,
    ServerConfig, StorageAppConfig, WeatherAppConfig,
};
pub use logging::{LoggingError, init_logging};
pub use validation::{SecurityValidator, SecurityWarning, WarningSeverity};
