//! Domain layer for Thermowatch
//!
//! Contains the value objects and entities that describe a temperature
//! observation: coordinates, temperatures, weather summaries and readings.
//! This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
