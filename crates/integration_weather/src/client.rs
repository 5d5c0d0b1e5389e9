//! Weatherbit weather client
//!
//! HTTP client for the Weatherbit current conditions endpoint.

use std::fmt;

use async_trait::async_trait;
use domain::WeatherFeatures;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::ApiResponse;

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// API key missing or rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Weather request timed out")]
    Timeout,
}

/// Weather service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Weatherbit API base URL (default: <https://api.weatherbit.io/v2.0>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Weatherbit API key
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.weatherbit.io/v2.0".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Weather client trait for fetching observations
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get the current observation for a location as a feature row
    async fn current_features(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherFeatures, WeatherError>;
}

/// Weatherbit HTTP client implementation
#[derive(Debug)]
pub struct WeatherbitClient {
    client: Client,
    config: WeatherConfig,
}

impl WeatherbitClient {
    /// Create a new Weatherbit client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }
}

#[async_trait]
impl WeatherClient for WeatherbitClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn current_features(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherFeatures, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| WeatherError::Unauthorized("No API key configured".to_string()))?;

        let url = format!("{}/current", self.config.base_url.trim_end_matches('/'));
        debug!(url = %url, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("key", api_key.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WeatherError::Timeout
                } else {
                    WeatherError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(WeatherError::Unauthorized(format!("HTTP {status}")));
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let observation = api_response.data.into_iter().next().ok_or_else(|| {
            WeatherError::ParseError("No observation in response".to_string())
        })?;
        let ts = observation.ts;

        observation
            .into_features()
            .ok_or_else(|| WeatherError::ParseError(format!("Invalid observation timestamp: {ts}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.base_url, "https://api.weatherbit.io/v2.0");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = WeatherConfig {
            api_key: Some("very-secret".to_string()),
            ..WeatherConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: WeatherConfig = serde_json::from_str(r#"{"api_key": "k"}"#).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.base_url, "https://api.weatherbit.io/v2.0");
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(WeatherbitClient::validate_coordinates(0.0, 0.0).is_ok());
        assert!(WeatherbitClient::validate_coordinates(-90.0, 180.0).is_ok());
        assert!(WeatherbitClient::validate_coordinates(90.5, 0.0).is_err());
        assert!(WeatherbitClient::validate_coordinates(0.0, -181.0).is_err());
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_request() {
        let client = WeatherbitClient::new(WeatherConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..WeatherConfig::default()
        })
        .unwrap();

        let err = client.current_features(19.0, 72.8).await.unwrap_err();
        assert!(matches!(err, WeatherError::Unauthorized(_)));
    }
}
