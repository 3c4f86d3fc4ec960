//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod temperature;

pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use temperature::{Temperature, TemperatureUnit};
