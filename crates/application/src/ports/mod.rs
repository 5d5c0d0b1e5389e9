//! Port definitions (interfaces for external dependencies)
//!
//! Ports define the contracts between the application layer and external
//! systems. Implementations (adapters) live in the infrastructure layer.

mod blockage_classifier_port;
mod email_port;
mod geocoding_port;
mod model_status_port;
mod object_storage_port;
mod weather_model_port;
mod weather_port;

#[cfg(test)]
pub use blockage_classifier_port::MockBlockageClassifierPort;
pub use blockage_classifier_port::BlockageClassifierPort;
#[cfg(test)]
pub use email_port::MockEmailPort;
pub use email_port::EmailPort;
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::{GeocodingPort, Place};
#[cfg(test)]
pub use model_status_port::MockModelStatusPort;
pub use model_status_port::{ModelStatus, ModelStatusPort};
#[cfg(test)]
pub use object_storage_port::MockObjectStoragePort;
pub use object_storage_port::ObjectStoragePort;
#[cfg(test)]
pub use weather_model_port::MockWeatherModelPort;
pub use weather_model_port::WeatherModelPort;
#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::WeatherPort;
