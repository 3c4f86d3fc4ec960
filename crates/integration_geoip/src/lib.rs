//! IP geolocation integration
//!
//! Resolves the approximate location of the host's public IP address using
//! the ip-api.com JSON endpoint (<https://ip-api.com/docs/api:json>).

pub mod client;
mod models;

pub use client::{GeoIpClient, GeoIpConfig, GeoIpError, IpApiClient};
pub use models::IpLocation;
