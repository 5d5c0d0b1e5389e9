//! Drain blockage classification

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Blockage state of a drain as classified from an inspection image
///
/// The discriminants are the classifier's output class indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockageState {
    /// Drain fully obstructed (class 0)
    Full,
    /// Drain clear (class 1)
    None,
    /// Drain partially obstructed (class 2)
    Partial,
}

impl BlockageState {
    /// Map a classifier class index to a blockage state
    ///
    /// # Errors
    ///
    /// Returns a validation error for any index other than 0, 1 or 2.
    pub fn from_class_index(index: u8) -> Result<Self, DomainError> {
        match index {
            0 => Ok(Self::Full),
            1 => Ok(Self::None),
            2 => Ok(Self::Partial),
            other => Err(DomainError::validation(format!(
                "unrecognized blockage state {other} (expected 0, 1 or 2)"
            ))),
        }
    }

    /// Classifier class index for this state
    #[must_use]
    pub const fn class_index(self) -> u8 {
        match self {
            Self::Full => 0,
            Self::None => 1,
            Self::Partial => 2,
        }
    }
}

impl fmt::Display for BlockageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Full => "full blockage",
            Self::None => "no blockage",
            Self::Partial => "partial blockage",
        };
        f.write_str(label)
    }
}

/// Output of the image classifier for one uploaded image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockagePrediction {
    /// Predicted blockage state
    pub state: BlockageState,
    /// Probability of the predicted class (0.0 - 1.0)
    pub confidence: f64,
    /// Per-pixel or per-region attribution values, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributions: Option<Vec<f64>>,
}

impl BlockagePrediction {
    /// Create a prediction, validating the confidence range
    ///
    /// # Errors
    ///
    /// Returns a validation error if `confidence` is not finite or outside [0, 1].
    pub fn new(state: BlockageState, confidence: f64) -> Result<Self, DomainError> {
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(DomainError::validation(format!(
                "confidence {confidence} must be within [0, 1]"
            )));
        }
        Ok(Self {
            state,
            confidence,
            attributions: None,
        })
    }

    /// Attach attribution values
    #[must_use]
    pub fn with_attributions(mut self, attributions: Vec<f64>) -> Self {
        self.attributions = Some(attributions);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_index_mapping() {
        assert_eq!(BlockageState::from_class_index(0), Ok(BlockageState::Full));
        assert_eq!(BlockageState::from_class_index(1), Ok(BlockageState::None));
        assert_eq!(
            BlockageState::from_class_index(2),
            Ok(BlockageState::Partial)
        );
        assert!(BlockageState::from_class_index(3).is_err());
    }

    #[test]
    fn class_index_is_inverse() {
        for index in 0..=2 {
            let state = BlockageState::from_class_index(index).expect("valid index");
            assert_eq!(state.class_index(), index);
        }
    }

    #[test]
    fn prediction_rejects_bad_confidence() {
        assert!(BlockagePrediction::new(BlockageState::Full, 1.5).is_err());
        assert!(BlockagePrediction::new(BlockageState::Full, -0.1).is_err());
        assert!(BlockagePrediction::new(BlockageState::Full, f64::NAN).is_err());
        assert!(BlockagePrediction::new(BlockageState::Full, 1.0).is_ok());
    }

    #[test]
    fn state_serializes_snake_case() {
        let json = serde_json::to_string(&BlockageState::Partial).expect("serialize");
        assert_eq!(json, "\"partial\"");
    }

    #[test]
    fn attributions_omitted_when_absent() {
        let prediction = BlockagePrediction::new(BlockageState::None, 0.9).expect("valid");
        let json = serde_json::to_string(&prediction).expect("serialize");
        assert!(!json.contains("attributions"));
    }
}
