//! Readiness aggregation service

use std::{fmt, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{instrument, warn};

use crate::ports::{ModelStatus, ModelStatusPort};

/// Default time budget for a readiness probe
const DEFAULT_READINESS_TIMEOUT: Duration = Duration::from_secs(5);

/// Aggregated readiness of the prediction backends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessReport {
    /// Whether predictions can be served
    pub ready: bool,
    /// Whether the startup artifacts were loaded
    pub models_loaded: bool,
    /// Per-model serving status
    pub models: Vec<ModelStatus>,
}

/// Checks whether the service can answer prediction requests
pub struct HealthService {
    models: Arc<dyn ModelStatusPort>,
    timeout: Duration,
}

impl fmt::Debug for HealthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthService")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl HealthService {
    pub fn new(models: Arc<dyn ModelStatusPort>) -> Self {
        Self {
            models,
            timeout: DEFAULT_READINESS_TIMEOUT,
        }
    }

    /// Override the probe time budget
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the readiness probe
    #[instrument(skip(self))]
    pub async fn readiness(&self) -> ReadinessReport {
        let models_loaded = self.models.is_loaded();
        if !models_loaded {
            return ReadinessReport {
                ready: false,
                models_loaded,
                models: Vec::new(),
            };
        }

        let models = if let Ok(statuses) = timeout(self.timeout, self.models.model_statuses()).await
        {
            statuses
        } else {
            warn!(timeout_ms = self.timeout.as_millis(), "Model status check timed out");
            vec![ModelStatus::unavailable("model-server", "Status check timed out")]
        };

        ReadinessReport {
            ready: models.iter().all(|m| m.ready),
            models_loaded,
            models,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockModelStatusPort;

    #[tokio::test]
    async fn ready_when_every_model_serves() {
        let mut port = MockModelStatusPort::new();
        port.expect_is_loaded().return_const(true);
        port.expect_model_statuses().returning(|| {
            vec![
                ModelStatus::ready("drain_blockage"),
                ModelStatus::ready("weather"),
            ]
        });

        let report = HealthService::new(Arc::new(port)).readiness().await;
        assert!(report.ready);
        assert_eq!(report.models.len(), 2);
    }

    #[tokio::test]
    async fn not_ready_when_one_model_is_down() {
        let mut port = MockModelStatusPort::new();
        port.expect_is_loaded().return_const(true);
        port.expect_model_statuses().returning(|| {
            vec![
                ModelStatus::ready("drain_blockage"),
                ModelStatus::unavailable("weather", "LOADING"),
            ]
        });

        let report = HealthService::new(Arc::new(port)).readiness().await;
        assert!(!report.ready);
        assert!(report.models_loaded);
    }

    #[tokio::test]
    async fn not_ready_without_artifacts() {
        let mut port = MockModelStatusPort::new();
        port.expect_is_loaded().return_const(false);

        let report = HealthService::new(Arc::new(port)).readiness().await;
        assert!(!report.ready);
        assert!(!report.models_loaded);
        assert!(report.models.is_empty());
    }
}
