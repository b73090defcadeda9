//! HTTP API handlers for spoofify

pub mod band;
pub mod health;

pub use band::{band_json, band_routes, index};
pub use health::health_routes;
