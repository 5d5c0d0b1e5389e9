//! Model adapter - Implements the model ports using ai_core
//!
//! One adapter serves the weather model, the blockage classifier and the
//! readiness probe, all backed by the same [`ModelContext`]. When the
//! context could not be built at startup the adapter stays in an unloaded
//! state and every prediction fails with `ModelUnavailable`.

use std::sync::Arc;

use ai_core::{ModelContext, ModelServingConfig, ModelServingError, ModelState};
use application::error::ApplicationError;
use application::ports::{BlockageClassifierPort, ModelStatus, ModelStatusPort, WeatherModelPort};
use async_trait::async_trait;
use domain::{BlockagePrediction, WeatherFeatures, WeatherPrediction};
use tracing::{debug, info, instrument, warn};

const NOT_LOADED: &str = "Prediction models are not loaded";

/// Adapter exposing the model context through the application ports
#[derive(Debug, Clone)]
pub struct ModelAdapter {
    context: Option<Arc<ModelContext>>,
    load_error: Option<String>,
}

impl ModelAdapter {
    /// Wrap a loaded context
    pub fn new(context: ModelContext) -> Self {
        Self {
            context: Some(Arc::new(context)),
            load_error: None,
        }
    }

    /// An adapter whose models failed to load
    pub fn unloaded(reason: impl Into<String>) -> Self {
        Self {
            context: None,
            load_error: Some(reason.into()),
        }
    }

    /// Build the context, degrading to the unloaded state on failure
    pub fn load(config: &ModelServingConfig) -> Self {
        match ModelContext::load(config) {
            Ok(context) => {
                info!(models = ?context.served_models(), "Prediction models loaded");
                Self::new(context)
            },
            Err(e) => {
                warn!(error = %e, "Failed to load prediction models");
                Self::unloaded(e.to_string())
            },
        }
    }

    /// Why the models are not loaded, if they are not
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    fn context(&self) -> Result<&ModelContext, ApplicationError> {
        self.context
            .as_deref()
            .ok_or_else(|| ApplicationError::ModelUnavailable(NOT_LOADED.to_string()))
    }

    fn map_error(err: ModelServingError) -> ApplicationError {
        match err {
            ModelServingError::ModelNotAvailable(e) | ModelServingError::Artifact(e) => {
                ApplicationError::ModelUnavailable(e)
            },
            ModelServingError::ConnectionFailed(e)
            | ModelServingError::RequestFailed(e)
            | ModelServingError::ServerError(e) => ApplicationError::ExternalService(e),
            ModelServingError::InvalidResponse(e) => {
                ApplicationError::ExternalService(format!("Malformed model response: {e}"))
            },
            ModelServingError::Timeout => {
                ApplicationError::ExternalService("Model server timed out".into())
            },
        }
    }
}

#[async_trait]
impl WeatherModelPort for ModelAdapter {
    #[instrument(skip(self, features))]
    async fn predict(
        &self,
        features: &WeatherFeatures,
        explain: bool,
    ) -> Result<WeatherPrediction, ApplicationError> {
        let prediction = self
            .context()?
            .weather()
            .predict(features, explain)
            .await
            .map_err(Self::map_error)?;

        debug!(
            weather = %prediction.weather,
            precip = prediction.precip,
            explained = prediction.attributions.is_some(),
            "Weather prediction"
        );
        Ok(prediction)
    }
}

#[async_trait]
impl BlockageClassifierPort for ModelAdapter {
    #[instrument(skip(self, image), fields(image_bytes = image.len()))]
    async fn classify(&self, image: &[u8]) -> Result<BlockagePrediction, ApplicationError> {
        let prediction = self
            .context()?
            .blockage()
            .classify(image)
            .await
            .map_err(Self::map_error)?;

        debug!(
            state = %prediction.state,
            confidence = prediction.confidence,
            "Blockage classification"
        );
        Ok(prediction)
    }
}

#[async_trait]
impl ModelStatusPort for ModelAdapter {
    fn is_loaded(&self) -> bool {
        self.context.is_some()
    }

    async fn model_statuses(&self) -> Vec<ModelStatus> {
        let Some(context) = self.context.as_deref() else {
            return Vec::new();
        };

        context
            .model_states()
            .await
            .into_iter()
            .map(|(name, state)| match state {
                Ok(ModelState::Available) => ModelStatus::ready(name),
                Ok(ModelState::NotReady(detail)) => ModelStatus::unavailable(name, detail),
                Err(e) => ModelStatus::unavailable(name, e.to_string()),
            })
            .collect()
    }
}
