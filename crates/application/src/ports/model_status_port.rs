//! Model readiness port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Serving status of one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStatus {
    /// Model name as known to the serving backend
    pub name: String,
    /// Whether the model can answer predictions
    pub ready: bool,
    /// Error or state detail when not ready
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ModelStatus {
    /// Status of a ready model
    pub fn ready(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ready: true,
            detail: None,
        }
    }

    /// Status of a model that cannot serve
    pub fn unavailable(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ready: false,
            detail: Some(detail.into()),
        }
    }
}

/// Port reporting whether prediction models are loaded and serving
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ModelStatusPort: Send + Sync {
    /// Whether the startup artifacts were loaded
    fn is_loaded(&self) -> bool;

    /// Query each model backend for its serving status
    async fn model_statuses(&self) -> Vec<ModelStatus>;
}
