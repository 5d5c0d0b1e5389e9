//! Drain blockage classifier

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use domain::{BlockagePrediction, BlockageState};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{error::ModelServingError, serving::ServingClient};

/// Number of classes the classifier emits (full, none, partial)
const CLASS_COUNT: usize = 3;

#[derive(Debug, Serialize)]
struct ImageInstance<'a> {
    b64: &'a str,
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    instances: [ImageInstance<'a>; 1],
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    predictions: Vec<Vec<f64>>,
    #[serde(default)]
    attributions: Option<Vec<Vec<f64>>>,
}

/// Client for the CNN that classifies drain photos
#[derive(Debug, Clone)]
pub struct BlockageClassifier {
    serving: Arc<ServingClient>,
    model: String,
}

impl BlockageClassifier {
    pub fn new(serving: Arc<ServingClient>, model: impl Into<String>) -> Self {
        Self {
            serving,
            model: model.into(),
        }
    }

    /// Model name on the serving backend
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Classify one image
    #[instrument(skip(self, image), fields(model = %self.model, bytes = image.len()))]
    pub async fn classify(&self, image: &[u8]) -> Result<BlockagePrediction, ModelServingError> {
        let encoded = STANDARD.encode(image);
        let request = ClassifyRequest {
            instances: [ImageInstance { b64: &encoded }],
        };

        let response: ClassifyResponse = self.serving.predict(&self.model, &request).await?;
        let probabilities = response.predictions.into_iter().next().ok_or_else(|| {
            ModelServingError::InvalidResponse("classifier returned no predictions".to_string())
        })?;

        let mut prediction = interpret(&probabilities)?;
        if let Some(attributions) = response.attributions.and_then(|a| a.into_iter().next()) {
            prediction = prediction.with_attributions(attributions);
        }

        debug!(state = %prediction.state, confidence = prediction.confidence, "Classified image");
        Ok(prediction)
    }
}

/// Pick the most probable class
fn interpret(probabilities: &[f64]) -> Result<BlockagePrediction, ModelServingError> {
    if probabilities.len() != CLASS_COUNT {
        return Err(ModelServingError::InvalidResponse(format!(
            "expected {CLASS_COUNT} class probabilities, got {}",
            probabilities.len()
        )));
    }
    if probabilities.iter().any(|p| !p.is_finite()) {
        return Err(ModelServingError::InvalidResponse(
            "class probabilities must be finite".to_string(),
        ));
    }

    let (index, confidence) = probabilities
        .iter()
        .copied()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, p)| {
            if p > best.1 { (i, p) } else { best }
        });

    let index = u8::try_from(index)
        .map_err(|_| ModelServingError::InvalidResponse(format!("class index {index}")))?;
    let state = BlockageState::from_class_index(index)
        .map_err(|e| ModelServingError::InvalidResponse(e.to_string()))?;

    BlockagePrediction::new(state, confidence)
        .map_err(|e| ModelServingError::InvalidResponse(e.to_string()))
}
