//! Horse search, profile and training endpoints

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use keiba_common::api::{HorseSearchResponse, TrainingResponse};
use keiba_common::transforms::{chart_time_domain, sort_newest_first, to_chart_points, ChartPoint, TimeDomain};
use keiba_common::types::Horse;
use serde::{Deserialize, Serialize};

use crate::{ApiError, ApiResult, AppState};

/// Query parameters for horse search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Partial horse name
    #[serde(default)]
    pub q: String,
}

/// Chart-ready training series
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingChartResponse {
    pub horse_id: String,
    pub points: Vec<ChartPoint>,
    pub domain: TimeDomain,
}

/// GET /api/horses/search?q=NAME
///
/// Case-insensitive partial match. A blank query returns no horses.
pub async fn search_horses(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<HorseSearchResponse>> {
    Ok(Json(state.source.search_horses(&query.q).await?))
}

/// GET /api/horses/:horse_id
pub async fn get_horse(
    State(state): State<AppState>,
    Path(horse_id): Path<String>,
) -> ApiResult<Json<Horse>> {
    state
        .source
        .horse(&horse_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("horse {}", horse_id)))
}

/// GET /api/horses/:horse_id/training
///
/// Sessions most recent first, as shown in the training table.
pub async fn get_horse_training(
    State(state): State<AppState>,
    Path(horse_id): Path<String>,
) -> ApiResult<Json<TrainingResponse>> {
    let mut response = state.source.training_by_horse(&horse_id).await?;
    sort_newest_first(&mut response.trainings);
    Ok(Json(response))
}

/// GET /api/horses/:horse_id/training/chart
pub async fn get_horse_training_chart(
    State(state): State<AppState>,
    Path(horse_id): Path<String>,
) -> ApiResult<Json<TrainingChartResponse>> {
    let response = state.source.training_by_horse(&horse_id).await?;

    Ok(Json(TrainingChartResponse {
        points: to_chart_points(&response.trainings),
        domain: chart_time_domain(&response.trainings),
        horse_id,
    }))
}

/// Build horse routes
pub fn horse_routes() -> Router<AppState> {
    Router::new()
        .route("/horses/search", get(search_horses))
        .route("/horses/:horse_id", get(get_horse))
        .route("/horses/:horse_id/training", get(get_horse_training))
        .route("/horses/:horse_id/training/chart", get(get_horse_training_chart))
}
