//! Race data source backed by a remote JSON API

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{
    ApiClient, EntriesResponse, HorseSearchResponse, ProviderError, RaceDataSource, RacesResponse,
    TrainingResponse,
};
use crate::types::{Horse, Race, TrainingData};

/// Provider reached over HTTP
///
/// Endpoints, relative to the client's base URL:
/// `/races?date=`, `/races/{id}`, `/races/{id}/entries`,
/// `/races/{id}/training`, `/horses/search?q=`, `/horses/{id}`,
/// `/horses/{id}/training`.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: ApiClient,
}

impl HttpDataSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RaceDataSource for HttpDataSource {
    async fn races_by_date(&self, date: NaiveDate) -> Result<RacesResponse, ProviderError> {
        let date = date.format("%Y-%m-%d").to_string();
        self.client.get_json(&["races"], &[("date", date.as_str())]).await
    }

    async fn race(&self, race_id: &str) -> Result<Option<Race>, ProviderError> {
        self.client.get_optional(&["races", race_id], &[]).await
    }

    async fn entries(&self, race_id: &str) -> Result<EntriesResponse, ProviderError> {
        let response = self
            .client
            .get_optional(&["races", race_id, "entries"], &[])
            .await?;
        Ok(response.unwrap_or_else(|| EntriesResponse {
            race_id: race_id.to_string(),
            entries: Vec::new(),
        }))
    }

    async fn training_by_horse(&self, horse_id: &str) -> Result<TrainingResponse, ProviderError> {
        let response = self
            .client
            .get_optional(&["horses", horse_id, "training"], &[])
            .await?;
        Ok(response.unwrap_or_else(|| TrainingResponse {
            horse_id: horse_id.to_string(),
            trainings: Vec::new(),
        }))
    }

    async fn training_by_race(&self, race_id: &str) -> Result<Vec<TrainingData>, ProviderError> {
        let response = self
            .client
            .get_optional(&["races", race_id, "training"], &[])
            .await?;
        Ok(response.unwrap_or_default())
    }

    async fn search_horses(&self, query: &str) -> Result<HorseSearchResponse, ProviderError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(HorseSearchResponse::new(Vec::new()));
        }
        self.client
            .get_json(&["horses", "search"], &[("q", query)])
            .await
    }

    async fn horse(&self, horse_id: &str) -> Result<Option<Horse>, ProviderError> {
        self.client.get_optional(&["horses", horse_id], &[]).await
    }
}
