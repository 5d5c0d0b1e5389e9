//! TF-Serving compatible REST client

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, info, instrument, warn};

use crate::error::ModelServingError;

/// Serving state of a model version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelState {
    /// At least one version is `AVAILABLE`
    Available,
    /// Known to the server but not serving (e.g. `LOADING`)
    NotReady(String),
}

impl ModelState {
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    model_version_status: Vec<VersionStatus>,
}

#[derive(Debug, Deserialize)]
struct VersionStatus {
    #[serde(default)]
    version: Option<String>,
    state: String,
}

/// Low-level client for `/v1/models/{name}` endpoints
#[derive(Debug, Clone)]
pub struct ServingClient {
    client: Client,
    base_url: String,
}

impl ServingClient {
    /// Create a new serving client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Result<Self, ModelServingError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| ModelServingError::ConnectionFailed(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(base_url = %base_url, "Initialized model serving client");

        Ok(Self { client, base_url })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/v1/models/{}", self.base_url, model)
    }

    /// Query the serving status of a model
    #[instrument(skip(self))]
    pub async fn model_state(&self, model: &str) -> Result<ModelState, ModelServingError> {
        let response = self.client.get(self.model_url(model)).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ModelServingError::ModelNotAvailable(model.to_string()));
        }
        if !status.is_success() {
            return Err(ModelServingError::ServerError(format!("HTTP {status}")));
        }

        let body: StatusResponse = response
            .json()
            .await
            .map_err(|e| ModelServingError::InvalidResponse(e.to_string()))?;

        if body
            .model_version_status
            .iter()
            .any(|v| v.state == "AVAILABLE")
        {
            return Ok(ModelState::Available);
        }

        let state = body
            .model_version_status
            .first()
            .map_or_else(|| "NO_VERSIONS".to_string(), |v| v.state.clone());
        debug!(
            versions = ?body.model_version_status.iter().map(|v| v.version.as_deref()).collect::<Vec<_>>(),
            %state,
            "Model not available"
        );
        Ok(ModelState::NotReady(state))
    }

    /// Call `:predict` on a model
    #[instrument(skip(self, body))]
    pub async fn predict<B, R>(&self, model: &str, body: &B) -> Result<R, ModelServingError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}:predict", self.model_url(model));
        debug!(url = %url, "Sending prediction request");

        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ModelServingError::ModelNotAvailable(model.to_string()));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "Prediction request failed");
            return Err(ModelServingError::ServerError(format!(
                "Status {status}: {text}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ModelServingError::InvalidResponse(e.to_string()))
    }
}
