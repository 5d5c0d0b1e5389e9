//! Nominatim geocoding client
//!
//! Implements rate limiting (max 1 request/second per Nominatim usage policy)
//! and result caching to minimize API calls.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::GeoLocation;
use moka::future::Cache;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in hours (0 to disable)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// User agent sent with every request, required by the usage policy
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Minimum spacing between requests in milliseconds
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    10
}

const fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_user_agent() -> String {
    "floodwatch/0.2 (flood risk service)".to_string()
}

const fn default_min_interval_ms() -> u64 {
    1100
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            cache_ttl_hours: default_cache_ttl_hours(),
            user_agent: default_user_agent(),
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 5,
            min_interval_ms: 0,
            ..Default::default()
        }
    }
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded upstream
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

/// City and address resolved for a coordinate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReversePlace {
    pub city: Option<String>,
    pub address: Option<String>,
}

/// Trait for reverse geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolve coordinates to a place, `None` when nothing is there
    async fn reverse_geocode(
        &self,
        location: &GeoLocation,
    ) -> Result<Option<ReversePlace>, GeocodingError>;
}

/// Nominatim-based geocoding client with rate limiting and caching
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    cache: Cache<String, Option<ReversePlace>>,
    last_request: Arc<Mutex<Instant>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache_ttl = if config.cache_ttl_hours > 0 {
            Duration::from_secs(config.cache_ttl_hours * 3600)
        } else {
            Duration::from_millis(1)
        };

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(cache_ttl)
            .build();

        let interval = Duration::from_millis(config.min_interval_ms);
        let start = Instant::now()
            .checked_sub(interval)
            .unwrap_or_else(Instant::now);

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Arc::new(Mutex::new(start)),
        })
    }

    /// Enforce the configured spacing between upstream requests
    async fn rate_limit(&self) {
        let interval = Duration::from_millis(self.config.min_interval_ms);
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < interval {
            let wait = interval.saturating_sub(elapsed);
            debug!(?wait, "Rate limiting geocoding request");
            tokio::time::sleep(wait).await;
        }
        *last = Instant::now();
    }

    async fn fetch(&self, location: &GeoLocation) -> Result<Option<ReversePlace>, GeocodingError> {
        self.rate_limit().await;

        let url = format!("{}/reverse", self.config.base_url.trim_end_matches('/'));
        let params = [
            ("lat", location.latitude().to_string()),
            ("lon", location.longitude().to_string()),
            ("format", "json".to_string()),
        ];

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded);
        }
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        let result: NominatimReverse = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Ok(result.into_place())
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self), fields(location = %location))]
    async fn reverse_geocode(
        &self,
        location: &GeoLocation,
    ) -> Result<Option<ReversePlace>, GeocodingError> {
        let cache_key = location.cache_key();
        if let Some(place) = self.cache.get(&cache_key).await {
            debug!("Geocoding cache hit");
            return Ok(place);
        }

        debug!("Reverse geocoding");
        let place = self.fetch(location).await?;
        self.cache.insert(cache_key, place.clone()).await;
        Ok(place)
    }
}

/// Raw Nominatim `/reverse` response
#[derive(Debug, Deserialize)]
struct NominatimReverse {
    display_name: Option<String>,
    #[serde(default)]
    address: NominatimAddress,
    /// Present instead of a result when nothing is at the coordinate
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
}

impl NominatimReverse {
    fn into_place(self) -> Option<ReversePlace> {
        if let Some(error) = self.error {
            debug!(%error, "Nominatim returned no result");
            return None;
        }

        let NominatimAddress {
            city,
            town,
            village,
            municipality,
        } = self.address;

        Some(ReversePlace {
            city: city.or(town).or(village).or(municipality),
            address: self.display_name,
        })
    }
}
