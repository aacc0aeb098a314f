//! Race data model shared by providers, transforms and the HTTP layer
//!
//! Field names serialize in camelCase to match the race data provider's
//! JSON contract.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Racecourse (venue) hosting a race meeting
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Racecourse {
    /// Stable racecourse id (e.g. "rc-05")
    pub id: String,
    /// Display name (e.g. "東京")
    pub name: String,
    /// Two-digit venue code (e.g. "05")
    pub code: String,
}

/// Track surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    Turf,
    Dirt,
}

/// A single race on a meeting day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    pub id: String,
    pub date: NaiveDate,
    pub racecourse: Racecourse,
    /// Race number within the meeting (1-12)
    pub race_number: u32,
    pub race_name: String,
    /// Distance in metres
    pub distance: u32,
    pub track_type: TrackType,
    /// Post time, "HH:mm"
    pub start_time: String,
}

impl Race {
    /// Graded stakes carry the grade in the race name, e.g. "東京新聞杯(G3)"
    pub fn is_graded(&self) -> bool {
        self.race_name.contains("(G")
    }
}

/// One line of a horse's form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastResult {
    pub date: NaiveDate,
    /// Racecourse name
    pub racecourse: String,
    pub distance: u32,
    /// Finishing position
    pub position: u32,
    /// Final time, "m:ss.f"
    pub time: String,
}

/// A horse declared to run in a race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub race_id: String,
    pub horse_number: u32,
    /// Horse id used to join with training data; empty when the provider omits it
    #[serde(default)]
    pub horse_id: String,
    pub horse_name: String,
    pub jockey: String,
    /// Weight carried (kg)
    pub weight: f64,
    /// Body weight (kg)
    pub horse_weight: u32,
    #[serde(default)]
    pub past_results: Vec<PastResult>,
}

/// Training course category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingCourse {
    /// Uphill slope (坂路)
    Slope,
    /// Woodchip/pool training track (CW)
    Cw,
}

impl TrainingCourse {
    /// Display label used in tables and chart legends
    pub fn label(&self) -> &'static str {
        match self {
            TrainingCourse::Slope => "坂路",
            TrainingCourse::Cw => "CW",
        }
    }
}

impl fmt::Display for TrainingCourse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One training session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingData {
    pub horse_id: String,
    pub date: NaiveDate,
    pub course: TrainingCourse,
    /// Furlong split times in running order; the last one is the "up time"
    #[serde(default)]
    pub times: Vec<f64>,
}

/// Horse profile with pedigree and full race record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Horse {
    pub id: String,
    pub name: String,
    pub birth_year: u32,
    /// Sire (父)
    pub sire: String,
    /// Dam (母)
    pub dam: String,
    /// Dam's sire (母父)
    pub dam_sire: String,
    #[serde(default)]
    pub results: Vec<PastResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_race_deserializes_camel_case() {
        let json = r#"{
            "id": "race-1",
            "date": "2025-01-05",
            "racecourse": {"id": "rc-05", "name": "東京", "code": "05"},
            "raceNumber": 11,
            "raceName": "東京新聞杯(G3)",
            "distance": 1600,
            "trackType": "turf",
            "startTime": "15:45"
        }"#;

        let race: Race = serde_json::from_str(json).unwrap();
        assert_eq!(race.race_number, 11);
        assert_eq!(race.date, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
        assert_eq!(race.track_type, TrackType::Turf);
        assert!(race.is_graded());
    }

    #[test]
    fn test_entry_without_horse_id() {
        let json = r#"{
            "id": "entry-1",
            "raceId": "race-1",
            "horseNumber": 3,
            "horseName": "ナミュール",
            "jockey": "C.ルメール",
            "weight": 55,
            "horseWeight": 468,
            "pastResults": []
        }"#;

        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.horse_number, 3);
        assert!(entry.horse_id.is_empty());
    }

    #[test]
    fn test_training_course_labels() {
        assert_eq!(TrainingCourse::Slope.label(), "坂路");
        assert_eq!(TrainingCourse::Cw.to_string(), "CW");
        assert_eq!(serde_json::to_string(&TrainingCourse::Cw).unwrap(), "\"cw\"");
    }
}
