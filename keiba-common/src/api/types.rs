//! Provider response payloads

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::transforms::RacecourseGroup;
use crate::types::{Entry, Horse, TrainingData};

/// Meetings for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RacesResponse {
    pub date: NaiveDate,
    pub racecourses: Vec<RacecourseGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntriesResponse {
    pub race_id: String,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingResponse {
    pub horse_id: String,
    pub trainings: Vec<TrainingData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorseSearchResponse {
    pub horses: Vec<Horse>,
    pub total: usize,
}

impl HorseSearchResponse {
    pub fn new(horses: Vec<Horse>) -> Self {
        let total = horses.len();
        Self { horses, total }
    }
}
