//! In-memory race data source over the built-in fixtures

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use super::{
    EntriesResponse, HorseSearchResponse, ProviderError, RaceDataSource, RacesResponse,
    TrainingResponse,
};
use crate::fixtures;
use crate::transforms::{group_races_by_course, races_on, search_horses};
use crate::types::{Entry, Horse, Race, TrainingData};

/// Provider answering from memory, optionally with simulated latency
#[derive(Debug, Clone)]
pub struct MockDataSource {
    races: Vec<Race>,
    entries: HashMap<String, Vec<Entry>>,
    training: Vec<TrainingData>,
    horses: Vec<Horse>,
    latency: Duration,
}

impl MockDataSource {
    pub fn new(
        races: Vec<Race>,
        entries: HashMap<String, Vec<Entry>>,
        training: Vec<TrainingData>,
        horses: Vec<Horse>,
    ) -> Self {
        Self {
            races,
            entries,
            training,
            horses,
            latency: Duration::ZERO,
        }
    }

    /// Source over the built-in fixtures
    pub fn with_fixtures() -> Self {
        Self::new(
            fixtures::races(),
            fixtures::entries(),
            fixtures::training(),
            fixtures::horses(),
        )
    }

    /// Delay every response by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MockDataSource {
    fn default() -> Self {
        Self::with_fixtures()
    }
}

#[async_trait]
impl RaceDataSource for MockDataSource {
    async fn races_by_date(&self, date: NaiveDate) -> Result<RacesResponse, ProviderError> {
        self.simulate_latency().await;
        let racecourses = group_races_by_course(races_on(date, &self.races).cloned());
        debug!(%date, groups = racecourses.len(), "Mock races by date");
        Ok(RacesResponse { date, racecourses })
    }

    async fn race(&self, race_id: &str) -> Result<Option<Race>, ProviderError> {
        self.simulate_latency().await;
        Ok(self.races.iter().find(|r| r.id == race_id).cloned())
    }

    async fn entries(&self, race_id: &str) -> Result<EntriesResponse, ProviderError> {
        self.simulate_latency().await;
        Ok(EntriesResponse {
            race_id: race_id.to_string(),
            entries: self.entries.get(race_id).cloned().unwrap_or_default(),
        })
    }

    async fn training_by_horse(&self, horse_id: &str) -> Result<TrainingResponse, ProviderError> {
        self.simulate_latency().await;
        Ok(TrainingResponse {
            horse_id: horse_id.to_string(),
            trainings: self
                .training
                .iter()
                .filter(|t| t.horse_id == horse_id)
                .cloned()
                .collect(),
        })
    }

    async fn training_by_race(&self, race_id: &str) -> Result<Vec<TrainingData>, ProviderError> {
        self.simulate_latency().await;
        let Some(entries) = self.entries.get(race_id) else {
            return Ok(Vec::new());
        };

        Ok(self
            .training
            .iter()
            .filter(|t| entries.iter().any(|e| e.horse_id == t.horse_id))
            .cloned()
            .collect())
    }

    async fn search_horses(&self, query: &str) -> Result<HorseSearchResponse, ProviderError> {
        self.simulate_latency().await;
        let horses = search_horses(&self.horses, query).into_iter().cloned().collect();
        Ok(HorseSearchResponse::new(horses))
    }

    async fn horse(&self, horse_id: &str) -> Result<Option<Horse>, ProviderError> {
        self.simulate_latency().await;
        Ok(self.horses.iter().find(|h| h.id == horse_id).cloned())
    }
}
