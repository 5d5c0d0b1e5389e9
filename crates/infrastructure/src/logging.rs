//! Tracing subscriber initialization
//!
//! `RUST_LOG` takes precedence over the configured filter.

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The filter directive could not be parsed
    #[error("Invalid log filter '{filter}': {reason}")]
    Filter {
        /// Offending directive
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber is already installed
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Build the filter from `RUST_LOG`, falling back to the configured directive
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.filter).map_err(|e| LoggingError::Filter {
        filter: config.filter.clone(),
        reason: e.to_string(),
    })
}

/// Install the global tracing subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let env_filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true),
            )
            .try_init(),
    };
    result.map_err(|e| LoggingError::Init(e.to_string()))?;

    info!(format = %config.format, "Logging initialized");
    Ok(())
}
