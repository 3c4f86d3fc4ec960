//! Application layer - Use cases and orchestration
//!
//! Contains the port definitions for location and weather lookups and the
//! temperature notifier that drives them on a schedule.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
