//! Application services

mod email_service;
mod flood_prediction_service;
mod geocoding_service;
mod health_service;
mod image_library_service;

pub use email_service::EmailService;
pub use flood_prediction_service::{
    FloodAssessment, FloodPredictionConfig, FloodPredictionRequest, FloodPredictionService,
};
pub use geocoding_service::{GeocodingService, ReverseGeocode};
pub use health_service::{HealthService, ReadinessReport};
pub use image_library_service::{DEFAULT_IMAGE_PREFIX, ImageLibraryService};
