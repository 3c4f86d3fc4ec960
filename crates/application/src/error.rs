//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// The first three variants form the refresh-cycle taxonomy. They are
/// cycle-local: a refresh that hits one of them is abandoned and the
/// schedule carries on.
#[derive(Debug, Clone, Error)]
pub enum ApplicationError {
    /// The location service could not provide a coordinate
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    /// The weather request failed in transport or returned a non-success status
    #[error("Weather fetch failed: {0}")]
    FetchTransport(String),

    /// The weather response could not be decoded
    #[error("Weather response could not be decoded: {0}")]
    FetchDecode(String),

    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Stable label for structured logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::LocationUnavailable(_) => "location_unavailable",
            Self::FetchTransport(_) => "fetch_transport",
            Self::FetchDecode(_) => "fetch_decode",
            Self::Domain(_) => "domain",
            Self::Configuration(_) => "configuration",
        }
    }
}
