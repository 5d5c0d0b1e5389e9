//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod email_adapter;
mod geocoding_adapter;
mod model_adapter;
mod s3_storage_adapter;
mod weather_adapter;

pub use email_adapter::Msg91EmailAdapter;
pub use geocoding_adapter::GeocodingAdapter;
pub use model_adapter::ModelAdapter;
pub use s3_storage_adapter::S3StorageAdapter;
pub use weather_adapter::WeatherAdapter;
