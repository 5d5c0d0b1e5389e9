//! Email adapter - Implements EmailPort using integration_msg91

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::EmailPort;
use async_trait::async_trait;
use integration_msg91::{EmailSender, Msg91Client, Msg91Config, Msg91Error};
use serde_json::Value;
use tracing::{instrument, warn};

/// Adapter for MSG91 transactional email
pub struct Msg91EmailAdapter {
    sender: Arc<dyn EmailSender>,
}

impl std::fmt::Debug for Msg91EmailAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Msg91EmailAdapter")
            .field("sender", &"EmailSender")
            .finish()
    }
}

impl Msg91EmailAdapter {
    /// Create an adapter backed by the MSG91 HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: Msg91Config) -> Result<Self, ApplicationError> {
        let client =
            Msg91Client::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self::with_sender(Arc::new(client)))
    }

    /// Create an adapter around an existing sender
    pub fn with_sender(sender: Arc<dyn EmailSender>) -> Self {
        Self { sender }
    }

    fn map_error(err: Msg91Error) -> ApplicationError {
        match err {
            Msg91Error::ConnectionFailed(e) => ApplicationError::ExternalService(e),
            Msg91Error::Timeout => {
                ApplicationError::ExternalService("MSG91 request timed out".into())
            },
            Msg91Error::MissingAuthKey => {
                ApplicationError::Configuration("MSG91 auth key is not configured".into())
            },
            Msg91Error::Api { body, .. } => ApplicationError::ExternalService(body),
            Msg91Error::ParseError(e) => {
                ApplicationError::ExternalService(format!("Malformed MSG91 response: {e}"))
            },
        }
    }
}

#[async_trait]
impl EmailPort for Msg91EmailAdapter {
    #[instrument(skip(self, payload))]
    async fn send(&self, payload: &Value) -> Result<Value, ApplicationError> {
        self.sender.send(payload).await.map_err(|e| {
            warn!(error = %e, retryable = e.is_retryable(), "MSG91 send failed");
            Self::map_error(e)
        })
    }
}
