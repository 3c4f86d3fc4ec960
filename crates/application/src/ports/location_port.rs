//! Location service port
//!
//! Defines the interface for asking where the host currently is.

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for current-location lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationPort: Send + Sync {
    /// Resolve the current location
    ///
    /// May be slow; callers should not assume it resolves promptly.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::LocationUnavailable` if no coordinate can
    /// be determined.
    async fn current_location(&self) -> Result<GeoLocation, ApplicationError>;
}
