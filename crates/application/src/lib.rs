//! Application layer - Use cases and orchestration
//!
//! Contains the flood prediction orchestrator, the ancillary services and
//! the port definitions implemented by infrastructure adapters.

pub mod error;
pub mod image_format;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use image_format::ImageFormat;
pub use ports::*;
pub use services::*;
