//! Race card: entries joined with the user's marks and recent form

use serde::{Deserialize, Serialize};

use crate::predictions::RaceMarks;
use crate::types::{Entry, PastResult, Race};
use crate::PredictionMark;

/// Number of past runs shown per entry
pub const RECENT_FORM_LIMIT: usize = 5;

/// One row of the race card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardEntry {
    #[serde(flatten)]
    pub entry: Entry,
    pub mark: Option<PredictionMark>,
    pub recent_form: Vec<PastResult>,
}

/// Race header plus marked entries ordered by horse number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceCard {
    pub race_id: String,
    pub race: Option<Race>,
    pub entries: Vec<CardEntry>,
}

/// Latest `limit` runs (providers list form newest first)
pub fn recent_form(results: &[PastResult], limit: usize) -> &[PastResult] {
    &results[..results.len().min(limit)]
}

/// Assemble a race card from a race, its entries and the stored marks
///
/// Marks for horse numbers with no entry are ignored.
pub fn build_race_card(
    race_id: &str,
    race: Option<Race>,
    entries: Vec<Entry>,
    marks: &RaceMarks,
) -> RaceCard {
    let mut rows: Vec<CardEntry> = entries
        .into_iter()
        .map(|entry| CardEntry {
            mark: marks.get(&entry.horse_number).copied(),
            recent_form: recent_form(&entry.past_results, RECENT_FORM_LIMIT).to_vec(),
            entry,
        })
        .collect();
    rows.sort_by_key(|row| row.entry.horse_number);

    RaceCard {
        race_id: race_id.to_string(),
        race,
        entries: rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn result(day: u32) -> PastResult {
        PastResult {
            date: NaiveDate::from_ymd_opt(2024, 12, day).unwrap(),
            racecourse: "東京".to_string(),
            distance: 1600,
            position: day,
            time: "1:33.0".to_string(),
        }
    }

    fn entry(number: u32, results: usize) -> Entry {
        Entry {
            id: format!("entry-{}", number),
            race_id: "r1".to_string(),
            horse_number: number,
            horse_id: format!("horse-{:03}", number),
            horse_name: format!("Horse {}", number),
            jockey: "Jockey".to_string(),
            weight: 57.0,
            horse_weight: 480,
            past_results: (1..=results as u32).map(result).collect(),
        }
    }

    #[test]
    fn test_recent_form_limits() {
        let results: Vec<PastResult> = (1..=7).map(result).collect();
        assert_eq!(recent_form(&results, 5).len(), 5);
        assert_eq!(recent_form(&results[..2], 5).len(), 2);
        assert_eq!(recent_form(&results, 5)[0], results[0]);
    }

    #[test]
    fn test_card_sorted_with_marks() {
        let mut marks = RaceMarks::new();
        marks.insert(2, PredictionMark::Honmei);
        marks.insert(9, PredictionMark::Hoshi);

        let card = build_race_card("r1", None, vec![entry(3, 7), entry(2, 1), entry(1, 0)], &marks);

        let numbers: Vec<u32> = card.entries.iter().map(|e| e.entry.horse_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(card.entries[0].mark, None);
        assert_eq!(card.entries[1].mark, Some(PredictionMark::Honmei));
        assert_eq!(card.entries[2].recent_form.len(), RECENT_FORM_LIMIT);
        assert_eq!(card.entries[2].entry.past_results.len(), 7);
    }

    #[test]
    fn test_card_serializes_flat_rows() {
        let mut marks = RaceMarks::new();
        marks.insert(1, PredictionMark::Renka);
        let card = build_race_card("r1", None, vec![entry(1, 1)], &marks);

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["raceId"], "r1");
        assert_eq!(json["entries"][0]["horseNumber"], 1);
        assert_eq!(json["entries"][0]["mark"], "△");
    }
}
