//! MSG91 HTTP client

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// MSG91 client errors
#[derive(Debug, Error)]
pub enum Msg91Error {
    /// HTTP client could not be built or the connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// No auth key configured
    #[error("MSG91 auth key is not configured")]
    MissingAuthKey,

    /// MSG91 rejected the request
    #[error("MSG91 API error (HTTP {status}): {body}")]
    Api {
        /// HTTP status returned by MSG91
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Response body was not JSON
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl Msg91Error {
    /// Whether retrying the same payload may succeed
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::MissingAuthKey | Self::ParseError(_) => false,
        }
    }
}

/// MSG91 configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct Msg91Config {
    /// Email send endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Value of the `authkey` header
    #[serde(default, skip_serializing)]
    pub auth_key: Option<String>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://control.msg91.com/api/v5/email/send".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for Msg91Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            auth_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl fmt::Debug for Msg91Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Msg91Config")
            .field("api_url", &self.api_url)
            .field("auth_key", &self.auth_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Sends provider-specific email payloads
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send a payload and return the provider response
    async fn send(&self, payload: &Value) -> Result<Value, Msg91Error>;
}

/// MSG91 HTTP client
#[derive(Debug)]
pub struct Msg91Client {
    client: Client,
    config: Msg91Config,
}

impl Msg91Client {
    /// Create a new MSG91 client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: Msg91Config) -> Result<Self, Msg91Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Msg91Error::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl EmailSender for Msg91Client {
    #[instrument(skip(self, payload))]
    async fn send(&self, payload: &Value) -> Result<Value, Msg91Error> {
        let auth_key = self
            .config
            .auth_key
            .as_deref()
            .ok_or(Msg91Error::MissingAuthKey)?;

        debug!(url = %self.config.api_url, "Posting email to MSG91");

        let response = self
            .client
            .post(&self.config.api_url)
            .header("authkey", auth_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Msg91Error::Timeout
                } else {
                    Msg91Error::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "MSG91 rejected email");
            return Err(Msg91Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| Msg91Error::ParseError(e.to_string()))
    }
}
