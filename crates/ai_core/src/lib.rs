//! AI Core - Model serving client and model handles
//!
//! The drain blockage CNN and the tabular weather model run behind a
//! TensorFlow Serving compatible REST server. This crate talks to that server,
//! standardises feature rows with the scaler artifact and interprets the raw
//! model outputs.

pub mod blockage;
pub mod config;
pub mod context;
pub mod error;
pub mod scaler;
pub mod serving;
pub mod weather;

pub use blockage::BlockageClassifier;
pub use config::{ModelServingConfig, WeatherModelMode};
pub use context::ModelContext;
pub use error::ModelServingError;
pub use scaler::FeatureScaler;
pub use serving::{ModelState, ServingClient};
pub use weather::WeatherModel;
