//! Race data providers
//!
//! [`RaceDataSource`] is the query interface the browser consumes. Two
//! implementations ship: [`MockDataSource`] over the built-in fixtures and
//! [`HttpDataSource`] over a remote JSON API.

pub mod client;
pub mod http;
pub mod mock;
pub mod types;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::{Horse, Race, TrainingData};

pub use client::{ApiClient, ProviderError};
pub use http::HttpDataSource;
pub use mock::MockDataSource;
pub use types::{EntriesResponse, HorseSearchResponse, RacesResponse, TrainingResponse};

/// Queries against a race data provider
///
/// Lookups by id return `Ok(None)` for unknown ids; errors are reserved for
/// transport and decoding failures.
#[async_trait]
pub trait RaceDataSource: Send + Sync {
    /// Meetings on `date`, grouped by racecourse
    async fn races_by_date(&self, date: NaiveDate) -> Result<RacesResponse, ProviderError>;

    async fn race(&self, race_id: &str) -> Result<Option<Race>, ProviderError>;

    /// Declared runners for a race (empty for unknown races)
    async fn entries(&self, race_id: &str) -> Result<EntriesResponse, ProviderError>;

    async fn training_by_horse(&self, horse_id: &str) -> Result<TrainingResponse, ProviderError>;

    /// Training sessions for every runner in a race
    async fn training_by_race(&self, race_id: &str) -> Result<Vec<TrainingData>, ProviderError>;

    /// Partial-match horse name search
    async fn search_horses(&self, query: &str) -> Result<HorseSearchResponse, ProviderError>;

    async fn horse(&self, horse_id: &str) -> Result<Option<Horse>, ProviderError>;
}
