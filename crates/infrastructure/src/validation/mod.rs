//! Configuration validation module
//!
//! Provides startup checks for application configuration.

pub mod security;

pub use security::{SecurityValidator, SecurityWarning, WarningSeverity};
