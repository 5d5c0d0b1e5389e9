//! Feature standardisation artifact
//!
//! The weather model was trained on standardised columns. The scaler's
//! parameters are exported once as JSON:
//!
//! ```json
//! {"feature_names": ["app_temp", ...], "mean": [...], "scale": [...]}
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::ModelServingError;

/// Per-column mean and scale used to standardise feature rows
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureScaler {
    feature_names: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl FeatureScaler {
    /// Build a scaler, checking that every vector has the same length
    ///
    /// # Errors
    ///
    /// Returns `Artifact` on length mismatch or non-finite parameters.
    pub fn new(
        feature_names: Vec<String>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    ) -> Result<Self, ModelServingError> {
        let scaler = Self {
            feature_names,
            mean,
            scale,
        };
        scaler.check()?;
        Ok(scaler)
    }

    /// Load a scaler artifact and check it against the expected columns
    ///
    /// # Errors
    ///
    /// Returns `Artifact` if the file cannot be read or parsed, or if its
    /// feature names differ from `expected_columns`.
    pub fn load(path: &Path, expected_columns: &[String]) -> Result<Self, ModelServingError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ModelServingError::Artifact(format!("cannot read {}: {e}", path.display()))
        })?;
        let scaler: Self = serde_json::from_str(&raw).map_err(|e| {
            ModelServingError::Artifact(format!("cannot parse {}: {e}", path.display()))
        })?;
        scaler.check()?;

        if scaler.feature_names != expected_columns {
            return Err(ModelServingError::Artifact(format!(
                "scaler columns {:?} do not match configured input columns {:?}",
                scaler.feature_names, expected_columns
            )));
        }

        info!(path = %path.display(), columns = scaler.feature_names.len(), "Loaded feature scaler");
        Ok(scaler)
    }

    fn check(&self) -> Result<(), ModelServingError> {
        let n = self.feature_names.len();
        if n == 0 || self.mean.len() != n || self.scale.len() != n {
            return Err(ModelServingError::Artifact(format!(
                "scaler has {} names, {} means and {} scales",
                n,
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self
            .mean
            .iter()
            .chain(self.scale.iter())
            .any(|v| !v.is_finite())
        {
            return Err(ModelServingError::Artifact(
                "scaler parameters must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Column names in model order
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Standardise one row: `(x - mean) / scale`, a zero scale counts as 1
    ///
    /// # Errors
    ///
    /// Returns `InvalidResponse` if the row length differs from the scaler.
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelServingError> {
        if row.len() != self.mean.len() {
            return Err(ModelServingError::InvalidResponse(format!(
                "row has {} values, scaler expects {}",
                row.len(),
                self.mean.len()
            )));
        }

        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }
}
