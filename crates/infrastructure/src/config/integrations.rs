//! Integration configurations: Weatherbit, Nominatim, MSG91, S3.

use integration_geocoding::NominatimConfig;
use integration_msg91::Msg91Config;
use integration_weather::WeatherConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

fn redacted(secret: Option<&SecretString>) -> Option<&'static str> {
    secret.map(|_| "[REDACTED]")
}

// ==============================
// Weather Configuration
// ==============================

/// Weatherbit configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// Weatherbit API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// Weatherbit API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_weather_base_url() -> String {
    "https://api.weatherbit.io/v2.0".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for WeatherAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redacted(self.api_key.as_ref()))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl WeatherAppConfig {
    /// Convert to the Weatherbit client configuration
    #[must_use]
    pub fn to_client_config(&self) -> WeatherConfig {
        WeatherConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string()),
            timeout_secs: self.timeout_secs,
        }
    }
}

// ==============================
// Geocoding Configuration
// ==============================

/// Nominatim reverse geocoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Nominatim base URL
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How long resolved places are cached (0 disables the cache)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// User agent required by the Nominatim usage policy
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_user_agent() -> String {
    "floodwatch/0.2 (flood risk service)".to_string()
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_hours: default_cache_ttl_hours(),
            user_agent: default_user_agent(),
        }
    }
}

impl GeocodingAppConfig {
    /// Convert to the Nominatim client configuration
    #[must_use]
    pub fn to_client_config(&self) -> NominatimConfig {
        NominatimConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            cache_ttl_hours: self.cache_ttl_hours,
            user_agent: self.user_agent.clone(),
            ..NominatimConfig::default()
        }
    }
}

// ==============================
// Email Configuration
// ==============================

/// MSG91 transactional email configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct EmailAppConfig {
    /// MSG91 email send endpoint
    #[serde(default = "default_email_api_url")]
    pub api_url: String,

    /// MSG91 auth key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub auth_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_email_api_url() -> String {
    "https://control.msg91.com/api/v5/email/send".to_string()
}

impl Default for EmailAppConfig {
    fn default() -> Self {
        Self {
            api_url: default_email_api_url(),
            auth_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for EmailAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailAppConfig")
            .field("api_url", &self.api_url)
            .field("auth_key", &redacted(self.auth_key.as_ref()))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl EmailAppConfig {
    /// Convert to the MSG91 client configuration
    #[must_use]
    pub fn to_client_config(&self) -> Msg91Config {
        Msg91Config {
            api_url: self.api_url.clone(),
            auth_key: self
                .auth_key
                .as_ref()
                .map(|key| key.expose_secret().to_string()),
            timeout_secs: self.timeout_secs,
        }
    }
}

// ==============================
// Object Storage Configuration
// ==============================

/// S3-compatible bucket holding the reference drain images
#[derive(Clone, Serialize, Deserialize)]
pub struct StorageAppConfig {
    /// Bucket name
    #[serde(default)]
    pub bucket: Option<String>,

    /// Region (e.g., "us-east-1", "eu-central-1")
    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint (for MinIO, Backblaze B2, etc.)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Access key (falls back to the AWS environment when unset)
    #[serde(default, skip_serializing)]
    pub access_key: Option<SecretString>,

    /// Secret key (falls back to the AWS environment when unset)
    #[serde(default, skip_serializing)]
    pub secret_key: Option<SecretString>,

    /// Key prefix the random image is drawn from
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_prefix() -> String {
    application::DEFAULT_IMAGE_PREFIX.to_string()
}

impl Default for StorageAppConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            region: default_region(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            prefix: default_prefix(),
        }
    }
}

impl std::fmt::Debug for StorageAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageAppConfig")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("access_key", &redacted(self.access_key.as_ref()))
            .field("secret_key", &redacted(self.secret_key.as_ref()))
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl StorageAppConfig {
    /// Whether both credentials are configured explicitly
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.access_key.is_some() && self.secret_key.is_some()
    }
}
