//! Fetch state for display layers
//!
//! A [`Resource`] tracks one remote query: what was last asked, and how it
//! went. Failures keep the query so the user can re-issue it verbatim with
//! [`Resource::retry`]. Nothing here retries on its own.

use std::fmt::Display;
use std::future::Future;

use serde::Serialize;
use tracing::warn;

use crate::api::RaceDataSource;
use crate::types::Horse;

/// Message shown when a search is submitted without a horse name
pub const BLANK_QUERY_MESSAGE: &str = "Enter a horse name to search";

/// Lifecycle of one fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum FetchState<T> {
    /// Nothing requested yet
    Idle,
    Loaded(T),
    /// Request failed; `message` is meant for display
    Failed { message: String },
}

/// A remembered query and the state of its latest fetch
#[derive(Debug, Clone)]
pub struct Resource<Q, T> {
    query: Option<Q>,
    state: FetchState<T>,
}

impl<Q, T> Default for Resource<Q, T> {
    fn default() -> Self {
        Self {
            query: None,
            state: FetchState::Idle,
        }
    }
}

impl<Q: Clone, T> Resource<Q, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Query of the latest fetch, if any
    pub fn query(&self) -> Option<&Q> {
        self.query.as_ref()
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            FetchState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self.state {
            FetchState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Run `f(query)` once and record the outcome
    pub async fn fetch<F, Fut, E>(&mut self, query: Q, f: F) -> &FetchState<T>
    where
        F: FnOnce(Q) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.query = Some(query.clone());
        self.state = match f(query).await {
            Ok(data) => FetchState::Loaded(data),
            Err(e) => {
                warn!(error = %e, "Fetch failed");
                FetchState::Failed {
                    message: e.to_string(),
                }
            }
        };
        &self.state
    }

    /// Re-issue the latest query; `None` if nothing was fetched yet
    pub async fn retry<F, Fut, E>(&mut self, f: F) -> Option<&FetchState<T>>
    where
        F: FnOnce(Q) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let query = self.query.clone()?;
        Some(self.fetch(query, f).await)
    }

    /// Forget the query and return to idle
    pub fn reset(&mut self) {
        self.query = None;
        self.state = FetchState::Idle;
    }
}

/// Horse search results plus the selected horse's detail
#[derive(Debug, Default)]
pub struct HorseSearch {
    results: Resource<String, Vec<Horse>>,
    detail: Resource<String, Option<Horse>>,
    notice: Option<&'static str>,
}

impl HorseSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &Resource<String, Vec<Horse>> {
        &self.results
    }

    pub fn detail(&self) -> &Resource<String, Option<Horse>> {
        &self.detail
    }

    /// Validation notice from the last search attempt
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    /// Search by name; blank queries only set a notice and keep prior results
    pub async fn search(&mut self, source: &dyn RaceDataSource, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.notice = Some(BLANK_QUERY_MESSAGE);
            return;
        }

        self.notice = None;
        self.detail.reset();
        self.results
            .fetch(query.to_string(), |q| async move {
                source.search_horses(&q).await.map(|r| r.horses)
            })
            .await;
    }

    /// Load one horse's detail; unknown ids load as `None`
    pub async fn select(&mut self, source: &dyn RaceDataSource, horse_id: &str) {
        self.detail
            .fetch(horse_id.to_string(), |id| async move { source.horse(&id).await })
            .await;
    }

    /// Re-issue whichever request failed last
    pub async fn retry(&mut self, source: &dyn RaceDataSource) {
        if self.detail.error().is_some() {
            self.detail
                .retry(|id| async move { source.horse(&id).await })
                .await;
        } else if self.results.error().is_some() {
            self.results
                .retry(|q| async move { source.search_horses(&q).await.map(|r| r.horses) })
                .await;
        }
    }
}
