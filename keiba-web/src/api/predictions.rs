//! Prediction mark endpoints
//!
//! Marks are stored per race and horse number. Clearing the last mark of a
//! race removes the race from the store.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use keiba_common::predictions::{RaceMarks, StoredPredictions};
use keiba_common::PredictionMark;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ApiResult, AppState};

/// One horse's mark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub race_id: String,
    pub horse_number: u32,
    pub mark: Option<PredictionMark>,
}

/// Request body for setting a mark; `null` clears it
#[derive(Debug, Deserialize)]
pub struct SetMarkRequest {
    pub mark: Option<PredictionMark>,
}

/// GET /api/predictions
pub async fn list_predictions(State(state): State<AppState>) -> ApiResult<Json<StoredPredictions>> {
    let all = state.with_predictions(|store| Ok(store.load_all())).await?;
    Ok(Json(all))
}

/// DELETE /api/predictions
pub async fn clear_predictions(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state.with_predictions(|store| store.clear_all()).await?;
    info!("Cleared all prediction marks");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/predictions/:race_id
pub async fn get_race_predictions(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
) -> ApiResult<Json<RaceMarks>> {
    let marks = state
        .with_predictions(move |store| Ok(store.group(&race_id)))
        .await?;
    Ok(Json(marks))
}

/// DELETE /api/predictions/:race_id
pub async fn clear_race_predictions(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .with_predictions(move |store| store.clear_race(&race_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/predictions/:race_id/:horse_number
pub async fn get_prediction(
    State(state): State<AppState>,
    Path((race_id, horse_number)): Path<(String, u32)>,
) -> ApiResult<Json<Prediction>> {
    let key = race_id.clone();
    let mark = state
        .with_predictions(move |store| Ok(store.get(&key, horse_number)))
        .await?;

    Ok(Json(Prediction {
        race_id,
        horse_number,
        mark,
    }))
}

/// PUT /api/predictions/:race_id/:horse_number
///
/// **Request:** `{"mark": "◎"}` or `{"mark": null}`
pub async fn set_prediction(
    State(state): State<AppState>,
    Path((race_id, horse_number)): Path<(String, u32)>,
    Json(payload): Json<SetMarkRequest>,
) -> ApiResult<Json<Prediction>> {
    let key = race_id.clone();
    let mark = payload.mark;
    state
        .with_predictions(move |store| store.set(&key, horse_number, mark))
        .await?;

    Ok(Json(Prediction {
        race_id,
        horse_number,
        mark,
    }))
}

/// DELETE /api/predictions/:race_id/:horse_number
pub async fn delete_prediction(
    State(state): State<AppState>,
    Path((race_id, horse_number)): Path<(String, u32)>,
) -> ApiResult<StatusCode> {
    state
        .with_predictions(move |store| store.delete(&race_id, horse_number))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Build prediction routes
pub fn prediction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/predictions",
            get(list_predictions).delete(clear_predictions),
        )
        .route(
            "/predictions/:race_id",
            get(get_race_predictions).delete(clear_race_predictions),
        )
        .route(
            "/predictions/:race_id/:horse_number",
            get(get_prediction)
                .put(set_prediction)
                .delete(delete_prediction),
        )
}
