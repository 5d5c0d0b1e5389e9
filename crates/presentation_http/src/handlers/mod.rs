//! HTTP request handlers

pub mod email;
pub mod geocoding;
pub mod health;
pub mod images;
pub mod prediction;
