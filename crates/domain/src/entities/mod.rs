//! Domain entities - Per-request records produced and consumed by the pipeline

mod blockage;
mod risk_verdict;
mod weather_features;

pub use blockage::{BlockagePrediction, BlockageState};
pub use risk_verdict::{RiskLevel, RiskVerdict, VerdictDebug};
pub use weather_features::{
    FeatureAttribution, ObservedOutcome, StationMetadata, WeatherFeatures, WeatherInputs,
    WeatherPrediction,
};
