//! Model handles built once at startup

use std::sync::Arc;

use tracing::info;

use crate::{
    blockage::BlockageClassifier,
    config::{ModelServingConfig, WeatherModelMode},
    error::ModelServingError,
    scaler::FeatureScaler,
    serving::{ModelState, ServingClient},
    weather::WeatherModel,
};

/// Immutable set of model handles shared by all requests
#[derive(Debug, Clone)]
pub struct ModelContext {
    serving: Arc<ServingClient>,
    blockage: BlockageClassifier,
    weather: WeatherModel,
}

impl ModelContext {
    /// Build the context, loading the scaler artifact when the weather model is remote
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or an artifact
    /// is missing or inconsistent.
    pub fn load(config: &ModelServingConfig) -> Result<Self, ModelServingError> {
        let serving = Arc::new(ServingClient::new(&config.base_url, config.timeout_ms)?);
        let blockage = BlockageClassifier::new(Arc::clone(&serving), &config.blockage_model);

        let weather = match config.weather_mode {
            WeatherModelMode::Observed => WeatherModel::observed(),
            WeatherModelMode::Remote => {
                let scaler = FeatureScaler::load(&config.scaler_path, &config.input_columns)?;
                WeatherModel::remote(Arc::clone(&serving), &config.weather_model, Arc::new(scaler))
            },
        };

        info!(
            blockage_model = %config.blockage_model,
            weather_mode = ?config.weather_mode,
            "Model context ready"
        );

        Ok(Self {
            serving,
            blockage,
            weather,
        })
    }

    pub fn blockage(&self) -> &BlockageClassifier {
        &self.blockage
    }

    pub fn weather(&self) -> &WeatherModel {
        &self.weather
    }

    /// Names of all models that must be served remotely
    pub fn served_models(&self) -> Vec<&str> {
        std::iter::once(self.blockage.model())
            .chain(self.weather.model_name())
            .collect()
    }

    /// Query the serving state of every remote model
    pub async fn model_states(&self) -> Vec<(String, Result<ModelState, ModelServingError>)> {
        let mut states = Vec::new();
        for model in self.served_models() {
            states.push((model.to_string(), self.serving.model_state(model).await));
        }
        states
    }
}
