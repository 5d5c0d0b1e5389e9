//! Transactional email port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;

use crate::error::ApplicationError;

/// Port for a transactional email provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmailPort: Send + Sync {
    /// Submit a provider payload and return the provider's response
    async fn send(&self, payload: &Value) -> Result<Value, ApplicationError>;
}
