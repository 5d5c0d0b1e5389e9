//! Application state for HTTP handlers

use std::sync::Arc;

use application::{
    EmailService, FloodPredictionService, GeocodingService, HealthService, ImageLibraryService,
};

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    /// Flood risk orchestrator
    pub prediction: Arc<FloodPredictionService>,
    /// Reverse geocoding
    pub geocoding: Arc<GeocodingService>,
    /// Reference images, absent when no bucket is configured
    pub images: Option<Arc<ImageLibraryService>>,
    /// Transactional email
    pub email: Arc<EmailService>,
    /// Model readiness
    pub health: Arc<HealthService>,
    /// Largest accepted request body on the upload route
    pub upload_limit: usize,
}
