//! Prediction mark persistence
//!
//! All marks live in a single JSON document under one storage key:
//!
//! ```json
//! { "race-2025-01-05-tokyo-11": { "3": "◎", "7": "▲" } }
//! ```
//!
//! Every mutation is a read-modify-write of the whole document. A race
//! whose last mark is cleared is removed from the document entirely.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::{Error, PredictionMark, Result};

mod backend;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "keiba_predictions";

/// Marks for one race, keyed by horse number
pub type RaceMarks = BTreeMap<u32, PredictionMark>;

/// Whole persisted document, keyed by race id
pub type StoredPredictions = BTreeMap<String, RaceMarks>;

/// Annotation store for prediction marks
#[derive(Clone)]
pub struct PredictionStore {
    backend: Arc<dyn StorageBackend>,
    key: String,
}

impl PredictionStore {
    pub fn new(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Store over a fresh in-memory backend under the default key
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()), DEFAULT_STORAGE_KEY)
    }

    /// Load every stored mark
    ///
    /// Missing, unreadable or unparsable documents yield an empty mapping.
    /// Inside a well-formed document, entries that are not a positive horse
    /// number mapped to a known mark are skipped; the rest survive.
    pub fn load_all(&self) -> StoredPredictions {
        let raw = match self.backend.load(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return StoredPredictions::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read predictions, treating as empty");
                return StoredPredictions::new();
            }
        };

        let document: BTreeMap<String, Value> = match serde_json::from_str(&raw) {
            Ok(document) => document,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding corrupt predictions document");
                return StoredPredictions::new();
            }
        };

        document
            .into_iter()
            .filter_map(|(race_id, group)| {
                let marks = decode_group(&race_id, group);
                (!marks.is_empty()).then_some((race_id, marks))
            })
            .collect()
    }

    /// Mark for one horse, `None` if unmarked or the race is unknown
    pub fn get(&self, race_id: &str, horse_number: u32) -> Option<PredictionMark> {
        self.load_all()
            .get(race_id)
            .and_then(|marks| marks.get(&horse_number))
            .copied()
    }

    /// All marks for one race (empty if none)
    pub fn group(&self, race_id: &str) -> RaceMarks {
        self.load_all().remove(race_id).unwrap_or_default()
    }

    /// Upsert a mark; `None` clears it (same as [`delete`](Self::delete))
    pub fn set(&self, race_id: &str, horse_number: u32, mark: Option<PredictionMark>) -> Result<()> {
        let Some(mark) = mark else {
            return self.delete(race_id, horse_number);
        };

        if horse_number == 0 {
            return Err(Error::InvalidInput(
                "horse number must be positive".to_string(),
            ));
        }

        let mut predictions = self.load_all();
        predictions
            .entry(race_id.to_string())
            .or_default()
            .insert(horse_number, mark);
        self.persist(&predictions)?;

        debug!(race_id, horse_number, mark = %mark, "Saved prediction mark");
        Ok(())
    }

    /// Remove one mark, dropping the race entry if it becomes empty
    pub fn delete(&self, race_id: &str, horse_number: u32) -> Result<()> {
        let mut predictions = self.load_all();
        if let Some(marks) = predictions.get_mut(race_id) {
            marks.remove(&horse_number);
            if marks.is_empty() {
                predictions.remove(race_id);
            }
        }
        self.persist(&predictions)?;

        debug!(race_id, horse_number, "Cleared prediction mark");
        Ok(())
    }

    /// Remove every mark for one race
    pub fn clear_race(&self, race_id: &str) -> Result<()> {
        let mut predictions = self.load_all();
        predictions.remove(race_id);
        self.persist(&predictions)?;

        debug!(race_id, "Cleared race predictions");
        Ok(())
    }

    /// Remove the whole persisted document
    pub fn clear_all(&self) -> Result<()> {
        self.backend.remove(&self.key)?;
        debug!(key = %self.key, "Cleared all predictions");
        Ok(())
    }

    fn persist(&self, predictions: &StoredPredictions) -> Result<()> {
        let payload = serde_json::to_string(predictions)?;
        self.backend.save(&self.key, &payload)
    }
}

/// Marks of one stored race group, skipping entries that do not decode
fn decode_group(race_id: &str, group: Value) -> RaceMarks {
    let Value::Object(entries) = group else {
        warn!(race_id, "Skipping race predictions that are not an object");
        return RaceMarks::new();
    };

    entries
        .into_iter()
        .filter_map(|(number, mark)| {
            let horse_number = number.parse::<u32>().ok().filter(|n| *n > 0);
            let mark = serde_json::from_value::<PredictionMark>(mark).ok();
            match (horse_number, mark) {
                (Some(horse_number), Some(mark)) => Some((horse_number, mark)),
                _ => {
                    warn!(race_id, horse_number = %number, "Skipping unreadable prediction mark");
                    None
                }
            }
        })
        .collect()
}

impl std::fmt::Debug for PredictionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
