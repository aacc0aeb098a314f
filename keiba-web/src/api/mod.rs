//! HTTP API handlers for keiba-web

pub mod health;
pub mod horses;
pub mod predictions;
pub mod races;

pub use health::health_routes;
pub use horses::horse_routes;
pub use predictions::prediction_routes;
pub use races::race_routes;
