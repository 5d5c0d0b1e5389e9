//! Tabular weather model

use std::sync::Arc;

use domain::{FeatureAttribution, WeatherFeatures, WeatherPrediction};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    config::WeatherModelMode, error::ModelServingError, scaler::FeatureScaler,
    serving::ServingClient,
};

#[derive(Debug, Serialize)]
struct WeatherRequest<'a> {
    instances: [&'a [f64]; 1],
    explain: bool,
}

#[derive(Debug, Deserialize)]
struct WeatherOutput {
    weather: String,
    precip: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    predictions: Vec<WeatherOutput>,
    #[serde(default)]
    attributions: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone)]
enum Backend {
    Observed,
    Remote {
        serving: Arc<ServingClient>,
        model: String,
        scaler: Arc<FeatureScaler>,
    },
}

/// Predicts weather category and precipitation for a feature row
#[derive(Debug, Clone)]
pub struct WeatherModel {
    backend: Backend,
}

impl WeatherModel {
    /// Model that echoes the observed outcome
    pub const fn observed() -> Self {
        Self {
            backend: Backend::Observed,
        }
    }

    /// Model served remotely, fed with standardised rows
    pub fn remote(
        serving: Arc<ServingClient>,
        model: impl Into<String>,
        scaler: Arc<FeatureScaler>,
    ) -> Self {
        Self {
            backend: Backend::Remote {
                serving,
                model: model.into(),
                scaler,
            },
        }
    }

    pub fn mode(&self) -> WeatherModelMode {
        match self.backend {
            Backend::Observed => WeatherModelMode::Observed,
            Backend::Remote { .. } => WeatherModelMode::Remote,
        }
    }

    /// Model name on the serving backend, if any
    pub fn model_name(&self) -> Option<&str> {
        match &self.backend {
            Backend::Observed => None,
            Backend::Remote { model, .. } => Some(model),
        }
    }

    /// Predict for one observation
    #[instrument(skip(self, features), fields(mode = ?self.mode()))]
    pub async fn predict(
        &self,
        features: &WeatherFeatures,
        explain: bool,
    ) -> Result<WeatherPrediction, ModelServingError> {
        let Backend::Remote {
            serving,
            model,
            scaler,
        } = &self.backend
        else {
            return Ok(WeatherPrediction::from_observed(&features.outputs));
        };

        let names = scaler.feature_names();
        let row = features.inputs.row(names).map_err(|column| {
            ModelServingError::Artifact(format!("unknown feature column '{column}'"))
        })?;
        let scaled = scaler.transform(&row)?;

        let request = WeatherRequest {
            instances: [scaled.as_slice()],
            explain,
        };
        let response: WeatherResponse = serving.predict(model, &request).await?;

        let output = response.predictions.into_iter().next().ok_or_else(|| {
            ModelServingError::InvalidResponse("weather model returned no predictions".to_string())
        })?;
        if !output.precip.is_finite() {
            return Err(ModelServingError::InvalidResponse(format!(
                "precipitation {} is not finite",
                output.precip
            )));
        }

        let attributions = if explain {
            response
                .attributions
                .and_then(|rows| rows.into_iter().next())
                .map(|values| attribute(names, values))
                .transpose()?
        } else {
            None
        };

        debug!(weather = %output.weather, precip = output.precip, "Weather predicted");
        Ok(WeatherPrediction {
            weather: output.weather,
            precip: output.precip,
            attributions,
        })
    }
}

fn attribute(
    names: &[String],
    values: Vec<f64>,
) -> Result<Vec<FeatureAttribution>, ModelServingError> {
    if values.len() != names.len() {
        return Err(ModelServingError::InvalidResponse(format!(
            "got {} attributions for {} features",
            values.len(),
            names.len()
        )));
    }
    Ok(names
        .iter()
        .zip(values)
        .map(|(feature, value)| FeatureAttribution {
            feature: feature.clone(),
            value,
        })
        .collect())
}
