//! # Keiba Common Library
//!
//! Shared code for the keiba race browser including:
//! - Race, entry, training and horse models
//! - Prediction mark persistence (annotation store)
//! - Derived-view transforms (course grouping, training charts, horse search)
//! - Race data providers (in-memory fixtures, HTTP client)
//! - Fetch state with user-initiated retry
//! - Configuration loading

pub mod api;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod marks;
pub mod predictions;
pub mod transforms;
pub mod types;
pub mod view;

pub use error::{Error, Result};
pub use marks::PredictionMark;
pub use predictions::PredictionStore;
