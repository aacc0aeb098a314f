//! Race meeting, race card and race training endpoints

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use keiba_common::api::{EntriesResponse, RacesResponse};
use keiba_common::transforms::{build_race_card, RaceCard};
use keiba_common::types::{Race, TrainingData};
use serde::Deserialize;
use tracing::debug;

use crate::{ApiError, ApiResult, AppState};

/// Query parameters for the meeting list
#[derive(Debug, Deserialize)]
pub struct RacesQuery {
    /// Meeting day, YYYY-MM-DD (defaults to today)
    pub date: Option<String>,
}

/// Parse a YYYY-MM-DD date parameter
pub fn parse_date(value: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("Invalid date (expected YYYY-MM-DD): {}", value)))
}

/// GET /api/races?date=YYYY-MM-DD
///
/// Meetings for one day, grouped by racecourse in provider order, races
/// ascending by race number. A day without meetings returns no groups.
pub async fn list_races(
    State(state): State<AppState>,
    Query(query): Query<RacesQuery>,
) -> ApiResult<Json<RacesResponse>> {
    let date = match query.date.as_deref() {
        Some(value) => parse_date(value)?,
        None => chrono::Local::now().date_naive(),
    };

    let response = state.source.races_by_date(date).await?;
    debug!(%date, racecourses = response.racecourses.len(), "Listed races");
    Ok(Json(response))
}

/// GET /api/races/:race_id
pub async fn get_race(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
) -> ApiResult<Json<Race>> {
    state
        .source
        .race(&race_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("race {}", race_id)))
}

/// GET /api/races/:race_id/entries
pub async fn get_entries(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
) -> ApiResult<Json<EntriesResponse>> {
    Ok(Json(state.source.entries(&race_id).await?))
}

/// GET /api/races/:race_id/training
pub async fn get_race_training(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
) -> ApiResult<Json<Vec<TrainingData>>> {
    Ok(Json(state.source.training_by_race(&race_id).await?))
}

/// GET /api/races/:race_id/card
///
/// Entries ordered by horse number with the stored prediction marks and
/// each runner's five most recent results. Unknown races return a card
/// with no race header and no entries.
pub async fn get_race_card(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
) -> ApiResult<Json<RaceCard>> {
    let (race, entries) = tokio::join!(state.source.race(&race_id), state.source.entries(&race_id));
    let race = race?;
    let entries = entries?.entries;

    let marks = {
        let race_id = race_id.clone();
        state
            .with_predictions(move |store| Ok(store.group(&race_id)))
            .await?
    };

    Ok(Json(build_race_card(&race_id, race, entries, &marks)))
}

/// Build race routes
pub fn race_routes() -> Router<AppState> {
    Router::new()
        .route("/races", get(list_races))
        .route("/races/:race_id", get(get_race))
        .route("/races/:race_id/entries", get(get_entries))
        .route("/races/:race_id/training", get(get_race_training))
        .route("/races/:race_id/card", get(get_race_card))
}
