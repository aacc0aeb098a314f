//! keiba-web library - race browser HTTP service
//!
//! Serves race meetings, race cards, training data and horse search as
//! JSON, and persists the user's prediction marks.

use std::sync::Arc;

use axum::Router;
use keiba_common::api::RaceDataSource;
use keiba_common::PredictionStore;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod bootstrap;
pub mod error;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Race data provider
    pub source: Arc<dyn RaceDataSource>,
    /// Prediction marks; the lock keeps read-modify-write cycles from interleaving
    pub predictions: Arc<Mutex<PredictionStore>>,
}

impl AppState {
    /// Create new application state
    pub fn new(source: Arc<dyn RaceDataSource>, predictions: PredictionStore) -> Self {
        Self {
            source,
            predictions: Arc::new(Mutex::new(predictions)),
        }
    }

    /// Run a prediction store operation on the blocking pool
    ///
    /// The lock is held until the operation returns, so file writes never
    /// interleave.
    pub async fn with_predictions<T, F>(&self, op: F) -> ApiResult<T>
    where
        F: FnOnce(&PredictionStore) -> keiba_common::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let guard = self.predictions.lock().await;
        let store = guard.clone();
        let outcome = tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| ApiError::Internal(format!("Prediction store task failed: {}", e)))?;
        drop(guard);
        Ok(outcome?)
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .nest(
            "/api",
            Router::new()
                .merge(api::race_routes())
                .merge(api::horse_routes())
                .merge(api::prediction_routes()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
