//! Email service
//!
//! Forwards transactional email payloads to the provider.

use std::{fmt, sync::Arc};

use serde_json::Value;
use tracing::{info, instrument};

use crate::{error::ApplicationError, ports::EmailPort};

/// Email service for sending provider payloads
pub struct EmailService {
    email_port: Arc<dyn EmailPort>,
}

impl fmt::Debug for EmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailService").finish_non_exhaustive()
    }
}

impl EmailService {
    /// Create a new email service
    pub fn new(email_port: Arc<dyn EmailPort>) -> Self {
        Self { email_port }
    }

    /// Send an email
    ///
    /// The payload is passed through untouched apart from checking that it
    /// is an object with non-empty `recipients`.
    #[instrument(skip(self, payload))]
    pub async fn send(&self, payload: Value) -> Result<Value, ApplicationError> {
        let Some(object) = payload.as_object() else {
            return Err(ApplicationError::InvalidInput(
                "Email payload must be a JSON object".to_string(),
            ));
        };

        let recipients = object.get("recipients").filter(|r| !is_blank(r));
        let Some(recipients) = recipients else {
            return Err(ApplicationError::InvalidInput(
                "Missing required field: recipients".to_string(),
            ));
        };
        let count = recipients.as_array().map_or(1, Vec::len);
        info!(recipients = count, "Sending email");

        self.email_port.send(&payload).await
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
