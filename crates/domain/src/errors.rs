//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude ranges
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
