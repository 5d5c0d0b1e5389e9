//! Flood risk verdict produced by the decision engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative flood risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// No meaningful risk
    Minimal,
    /// Some risk factors present
    Low,
    /// Flooding plausible
    Moderate,
    /// Flooding likely
    High,
}

impl RiskLevel {
    /// All levels in ascending order
    pub const ALL: [Self; 4] = [Self::Minimal, Self::Low, Self::Moderate, Self::High];

    /// Label as returned by the API
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw inputs echoed back when no rule claimed them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictDebug {
    pub precip: f64,
    pub weather: String,
    pub blockage_state: u8,
    pub confidence: f64,
    pub humidity: f64,
}

/// Final output of the flood-risk heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskVerdict {
    /// Qualitative risk
    #[serde(rename = "flood_risk")]
    pub risk_label: RiskLevel,
    /// Human-readable rationale for the selected rule
    pub reason: String,
    /// Input echo, only present on the fallback path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<VerdictDebug>,
}

impl RiskVerdict {
    /// Create a verdict without debug payload
    pub fn new(risk_label: RiskLevel, reason: impl Into<String>) -> Self {
        Self {
            risk_label,
            reason: reason.into(),
            debug: None,
        }
    }

    /// Attach a debug payload
    #[must_use]
    pub fn with_debug(mut self, debug: VerdictDebug) -> Self {
        self.debug = Some(debug);
        self
    }
}
