//! Domain layer for Floodwatch
//!
//! Contains the flood-risk decision engine, entities, value objects, and domain errors.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod flood_risk;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use flood_risk::{RiskInputs, evaluate, evaluate_inputs};
pub use value_objects::*;
