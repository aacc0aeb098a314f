//! Built-in race data used by the mock provider
//!
//! Two meeting days (2025-01-05 at Tokyo and Nakayama, 2025-01-06 at Kyoto)
//! with a full card, training log and horse profiles for the Tokyo 11R.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::types::{
    Entry, Horse, PastResult, Race, Racecourse, TrackType, TrainingCourse, TrainingData,
};

/// Race with a complete card in the fixtures
pub const FEATURE_RACE_ID: &str = "race-2025-01-05-tokyo-11";

type FormLine = (&'static str, &'static str, u32, u32, &'static str);

const RACECOURSES: [(&str, &str, &str); 10] = [
    ("rc-01", "札幌", "01"),
    ("rc-02", "函館", "02"),
    ("rc-03", "福島", "03"),
    ("rc-04", "新潟", "04"),
    ("rc-05", "東京", "05"),
    ("rc-06", "中山", "06"),
    ("rc-07", "中京", "07"),
    ("rc-08", "京都", "08"),
    ("rc-09", "阪神", "09"),
    ("rc-10", "小倉", "10"),
];

/// (date, racecourse id, slug, race number, name, distance, track, post time)
///
/// Deliberately interleaved so grouping has work to do.
const RACES: [(&str, &str, &str, u32, &str, u32, TrackType, &str); 12] = [
    ("2025-01-05", "rc-05", "tokyo", 11, "東京新聞杯(G3)", 1600, TrackType::Turf, "15:45"),
    ("2025-01-05", "rc-06", "nakayama", 1, "3歳未勝利", 1200, TrackType::Dirt, "10:05"),
    ("2025-01-05", "rc-05", "tokyo", 1, "3歳未勝利", 1400, TrackType::Dirt, "09:55"),
    ("2025-01-05", "rc-06", "nakayama", 11, "中山金杯(G3)", 2000, TrackType::Turf, "15:25"),
    ("2025-01-05", "rc-05", "tokyo", 12, "4歳以上2勝クラス", 1600, TrackType::Dirt, "16:20"),
    ("2025-01-05", "rc-05", "tokyo", 2, "3歳新馬", 1600, TrackType::Turf, "10:25"),
    ("2025-01-05", "rc-06", "nakayama", 10, "ジャニュアリーS", 1200, TrackType::Dirt, "14:50"),
    ("2025-01-05", "rc-06", "nakayama", 2, "3歳未勝利", 1800, TrackType::Dirt, "10:35"),
    ("2025-01-06", "rc-08", "kyoto", 11, "シンザン記念(G3)", 1600, TrackType::Turf, "15:35"),
    ("2025-01-06", "rc-08", "kyoto", 1, "3歳未勝利", 1200, TrackType::Dirt, "10:10"),
    ("2025-01-06", "rc-08", "kyoto", 5, "3歳新馬", 1800, TrackType::Turf, "12:20"),
    ("2025-01-06", "rc-08", "kyoto", 12, "4歳以上1勝クラス", 1400, TrackType::Dirt, "16:25"),
];

/// (horse id, name, birth year, sire, dam, dam sire, jockey, weight, body weight, form)
const RUNNERS: [(&str, &str, u32, &str, &str, &str, &str, f64, u32, [FormLine; 5]); 8] = [
    ("horse-001", "サンライズアース", 2021, "レイデオロ", "ドリームアース", "ディープインパクト", "川田将雅", 57.0, 486, [
        ("2024-12-22", "阪神", 1600, 2, "1:33.5"),
        ("2024-11-17", "東京", 1600, 1, "1:32.8"),
        ("2024-10-13", "東京", 1800, 3, "1:46.2"),
        ("2024-09-08", "中山", 1600, 1, "1:33.1"),
        ("2024-06-02", "東京", 1600, 4, "1:34.0"),
    ]),
    ("horse-002", "ウインカーネリアン", 2017, "スクリーンヒーロー", "コウセンボウ", "フジキセキ", "横山武史", 57.0, 502, [
        ("2024-12-08", "中山", 1600, 5, "1:34.2"),
        ("2024-11-03", "東京", 1600, 3, "1:33.0"),
        ("2024-10-06", "中山", 1600, 2, "1:33.8"),
        ("2024-08-25", "新潟", 1600, 1, "1:32.5"),
        ("2024-06-09", "東京", 1600, 6, "1:34.5"),
    ]),
    ("horse-003", "ナミュール", 2019, "ハービンジャー", "サンブルエミューズ", "ダイワメジャー", "C.ルメール", 55.0, 468, [
        ("2024-11-17", "東京", 1600, 1, "1:31.8"),
        ("2024-10-13", "東京", 1800, 2, "1:45.5"),
        ("2024-06-02", "東京", 1600, 1, "1:32.0"),
        ("2024-04-07", "阪神", 1600, 3, "1:33.2"),
        ("2024-02-18", "東京", 1600, 2, "1:32.5"),
    ]),
    ("horse-004", "ソウルラッシュ", 2018, "ルーラーシップ", "エターナルブーケ", "マンハッタンカフェ", "戸崎圭太", 57.0, 494, [
        ("2024-12-22", "阪神", 1600, 4, "1:33.8"),
        ("2024-11-17", "東京", 1600, 5, "1:33.2"),
        ("2024-10-13", "東京", 1800, 1, "1:45.0"),
        ("2024-06-02", "東京", 1600, 2, "1:32.2"),
        ("2024-04-07", "阪神", 1600, 1, "1:32.8"),
    ]),
    ("horse-005", "セリフォス", 2019, "ダイワメジャー", "シーフロント", "Le Havre", "福永祐一", 57.0, 478, [
        ("2024-12-08", "中山", 1600, 1, "1:33.0"),
        ("2024-11-03", "東京", 1600, 2, "1:32.5"),
        ("2024-10-06", "中山", 1600, 3, "1:34.0"),
        ("2024-06-09", "東京", 1600, 1, "1:32.0"),
        ("2024-04-14", "阪神", 1600, 4, "1:33.5"),
    ]),
    ("horse-006", "ジャスティンカフェ", 2018, "エピファネイア", "カジノブギ", "ワークフォース", "松山弘平", 57.0, 490, [
        ("2024-12-22", "阪神", 1600, 3, "1:33.6"),
        ("2024-11-17", "東京", 1600, 4, "1:33.0"),
        ("2024-10-13", "東京", 1800, 5, "1:46.5"),
        ("2024-06-02", "東京", 1600, 3, "1:32.5"),
        ("2024-04-07", "阪神", 1600, 2, "1:33.0"),
    ]),
    ("horse-007", "マテンロウオリオン", 2019, "ダイワメジャー", "パルテノン", "キングカメハメハ", "横山典弘", 57.0, 512, [
        ("2024-12-08", "中山", 1600, 6, "1:34.5"),
        ("2024-11-03", "東京", 1600, 7, "1:33.8"),
        ("2024-10-06", "中山", 1600, 4, "1:34.2"),
        ("2024-08-25", "新潟", 1600, 2, "1:32.8"),
        ("2024-06-09", "東京", 1600, 5, "1:34.0"),
    ]),
    ("horse-008", "ダノンスコーピオン", 2019, "ロードカナロア", "レキシールー", "Sligo Bay", "北村友一", 57.0, 482, [
        ("2024-12-22", "中山", 1600, 3, "1:35.2"),
        ("2024-12-01", "東京", 1600, 1, "1:34.8"),
        ("2024-11-10", "東京", 1400, 2, "1:22.5"),
        ("2024-10-20", "新潟", 1600, 5, "1:36.1"),
        ("2024-09-15", "中山", 1600, 4, "1:35.8"),
    ]),
];

/// Horses with profiles but no fixture entries
const OTHER_HORSES: [(&str, &str, u32, &str, &str, &str); 3] = [
    ("horse-101", "イクイノックス", 2019, "キタサンブラック", "シャトーブランシュ", "キングヘイロー"),
    ("horse-102", "ドウデュース", 2019, "ハーツクライ", "ダストアンドダイヤモンズ", "Vindication"),
    ("horse-103", "Sunrise Bay", 2020, "Frankel", "Morning Bay", "Galileo"),
];

/// (horse id, date, course, splits) for the Tokyo 11R runners
const TRAINING: [(&str, &str, TrainingCourse, &[f64]); 16] = [
    ("horse-001", "2025-01-03", TrainingCourse::Slope, &[13.2, 12.8, 12.5, 12.2]),
    ("horse-001", "2025-01-01", TrainingCourse::Cw, &[13.5, 13.0, 12.8, 12.5, 12.0]),
    ("horse-002", "2025-01-03", TrainingCourse::Slope, &[13.0, 12.6, 12.3, 12.0]),
    ("horse-002", "2025-01-02", TrainingCourse::Cw, &[13.8, 13.2, 12.9, 12.6, 12.2]),
    ("horse-003", "2025-01-03", TrainingCourse::Slope, &[12.8, 12.4, 12.1, 11.8]),
    ("horse-003", "2025-01-01", TrainingCourse::Cw, &[13.2, 12.8, 12.5, 12.2, 11.8]),
    ("horse-004", "2025-01-03", TrainingCourse::Slope, &[13.1, 12.7, 12.4, 12.1]),
    ("horse-004", "2025-01-02", TrainingCourse::Cw, &[13.6, 13.1, 12.8, 12.4, 12.0]),
    ("horse-005", "2025-01-03", TrainingCourse::Slope, &[12.9, 12.5, 12.2, 11.9]),
    ("horse-005", "2025-01-01", TrainingCourse::Cw, &[13.4, 12.9, 12.6, 12.3, 11.9]),
    ("horse-006", "2025-01-03", TrainingCourse::Slope, &[13.3, 12.9, 12.6, 12.3]),
    ("horse-006", "2025-01-02", TrainingCourse::Cw, &[13.7, 13.2, 12.9, 12.5, 12.1]),
    ("horse-007", "2025-01-03", TrainingCourse::Slope, &[13.4, 13.0, 12.7, 12.4]),
    ("horse-007", "2025-01-01", TrainingCourse::Cw, &[13.9, 13.4, 13.0, 12.7, 12.3]),
    ("horse-008", "2025-01-03", TrainingCourse::Slope, &[13.0, 12.6, 12.3, 12.0]),
    ("horse-008", "2025-01-02", TrainingCourse::Cw, &[13.5, 13.0, 12.7, 12.3, 11.9]),
];

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or(NaiveDate::MIN)
}

fn form(lines: &[FormLine]) -> Vec<PastResult> {
    lines
        .iter()
        .map(|&(d, course, distance, position, time)| PastResult {
            date: date(d),
            racecourse: course.to_string(),
            distance,
            position,
            time: time.to_string(),
        })
        .collect()
}

pub fn racecourses() -> Vec<Racecourse> {
    RACECOURSES
        .iter()
        .map(|&(id, name, code)| Racecourse {
            id: id.to_string(),
            name: name.to_string(),
            code: code.to_string(),
        })
        .collect()
}

pub fn races() -> Vec<Race> {
    let courses = racecourses();
    RACES
        .iter()
        .filter_map(|&(d, course_id, slug, number, name, distance, track_type, start)| {
            let racecourse = courses.iter().find(|c| c.id == course_id)?.clone();
            Some(Race {
                id: format!("race-{}-{}-{}", d, slug, number),
                date: date(d),
                racecourse,
                race_number: number,
                race_name: name.to_string(),
                distance,
                track_type,
                start_time: start.to_string(),
            })
        })
        .collect()
}

/// Cards keyed by race id
pub fn entries() -> HashMap<String, Vec<Entry>> {
    let card: Vec<Entry> = RUNNERS
        .iter()
        .enumerate()
        .map(|(i, &(horse_id, name, _, _, _, _, jockey, weight, body_weight, ref lines))| Entry {
            id: format!("entry-{:03}", i + 1),
            race_id: FEATURE_RACE_ID.to_string(),
            horse_number: i as u32 + 1,
            horse_id: horse_id.to_string(),
            horse_name: name.to_string(),
            jockey: jockey.to_string(),
            weight,
            horse_weight: body_weight,
            past_results: form(lines),
        })
        .collect();

    HashMap::from([(FEATURE_RACE_ID.to_string(), card)])
}

pub fn training() -> Vec<TrainingData> {
    TRAINING
        .iter()
        .map(|&(horse_id, d, course, times)| TrainingData {
            horse_id: horse_id.to_string(),
            date: date(d),
            course,
            times: times.to_vec(),
        })
        .collect()
}

pub fn horses() -> Vec<Horse> {
    let runners = RUNNERS.iter().map(
        |&(id, name, birth_year, sire, dam, dam_sire, _, _, _, ref lines)| Horse {
            id: id.to_string(),
            name: name.to_string(),
            birth_year,
            sire: sire.to_string(),
            dam: dam.to_string(),
            dam_sire: dam_sire.to_string(),
            results: form(lines),
        },
    );
    let others = OTHER_HORSES
        .iter()
        .map(|&(id, name, birth_year, sire, dam, dam_sire)| Horse {
            id: id.to_string(),
            name: name.to_string(),
            birth_year,
            sire: sire.to_string(),
            dam: dam.to_string(),
            dam_sire: dam_sire.to_string(),
            results: Vec::new(),
        });

    runners.chain(others).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_dates_parse() {
        assert!(races().iter().all(|r| r.date != NaiveDate::MIN));
        assert!(training().iter().all(|t| t.date != NaiveDate::MIN));
        assert!(horses()
            .iter()
            .flat_map(|h| &h.results)
            .all(|r| r.date != NaiveDate::MIN));
    }

    #[test]
    fn test_feature_race_exists_with_card() {
        assert!(races().iter().any(|r| r.id == FEATURE_RACE_ID));
        let cards = entries();
        let card = &cards[FEATURE_RACE_ID];
        assert_eq!(card.len(), 8);
        assert!(card.iter().all(|e| e.past_results.len() == 5));
    }

    #[test]
    fn test_every_runner_has_profile_and_training() {
        let horses = horses();
        let training = training();
        for entry in &entries()[FEATURE_RACE_ID] {
            assert!(horses.iter().any(|h| h.id == entry.horse_id));
            assert!(training.iter().any(|t| t.horse_id == entry.horse_id));
        }
    }

    #[test]
    fn test_race_ids_unique() {
        let races = races();
        let mut ids: Vec<&str> = races.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), races.len());
    }
}
