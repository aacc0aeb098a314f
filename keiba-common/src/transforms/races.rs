//! Race list grouping by racecourse

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Race, Racecourse};

/// All races at one racecourse, ascending by race number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RacecourseGroup {
    pub racecourse: Racecourse,
    pub races: Vec<Race>,
}

/// Group races by racecourse id
///
/// Groups appear in first-encounter order. Within a group races are
/// stably sorted by race number, so duplicate numbers keep input order.
pub fn group_races_by_course<I>(races: I) -> Vec<RacecourseGroup>
where
    I: IntoIterator<Item = Race>,
{
    let mut groups: Vec<RacecourseGroup> = Vec::new();

    for race in races {
        match groups
            .iter_mut()
            .find(|g| g.racecourse.id == race.racecourse.id)
        {
            Some(group) => group.races.push(race),
            None => groups.push(RacecourseGroup {
                racecourse: race.racecourse.clone(),
                races: vec![race],
            }),
        }
    }

    for group in &mut groups {
        group.races.sort_by_key(|r| r.race_number);
    }

    groups
}

/// Races held on `date`, in input order
pub fn races_on<'a, I>(date: NaiveDate, races: I) -> impl Iterator<Item = &'a Race>
where
    I: IntoIterator<Item = &'a Race>,
{
    races.into_iter().filter(move |r| r.date == date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TrackType;

    fn course(id: &str, name: &str) -> Racecourse {
        Racecourse {
            id: id.to_string(),
            name: name.to_string(),
            code: id.trim_start_matches("rc-").to_string(),
        }
    }

    fn race(id: &str, rc: &Racecourse, number: u32) -> Race {
        Race {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            racecourse: rc.clone(),
            race_number: number,
            race_name: format!("{}R", number),
            distance: 1600,
            track_type: TrackType::Turf,
            start_time: "10:00".to_string(),
        }
    }

    #[test]
    fn test_groups_in_first_encounter_order() {
        let nakayama = course("rc-06", "中山");
        let tokyo = course("rc-05", "東京");
        let races = vec![
            race("a", &nakayama, 3),
            race("b", &tokyo, 11),
            race("c", &nakayama, 1),
            race("d", &tokyo, 2),
        ];

        let groups = group_races_by_course(races);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].racecourse.id, "rc-06");
        assert_eq!(groups[1].racecourse.id, "rc-05");
        let numbers: Vec<u32> = groups[0].races.iter().map(|r| r.race_number).collect();
        assert_eq!(numbers, vec![1, 3]);
        let numbers: Vec<u32> = groups[1].races.iter().map(|r| r.race_number).collect();
        assert_eq!(numbers, vec![2, 11]);
    }

    #[test]
    fn test_every_race_lands_in_its_course_group() {
        let courses = [course("rc-05", "東京"), course("rc-06", "中山"), course("rc-08", "京都")];
        let races: Vec<Race> = (0..30u32)
            .map(|i| race(&format!("race-{}", i), &courses[(i * 7 % 3) as usize], (i * 5) % 12 + 1))
            .collect();

        let groups = group_races_by_course(races.clone());

        let total: usize = groups.iter().map(|g| g.races.len()).sum();
        assert_eq!(total, races.len());
        for group in &groups {
            assert!(group.races.iter().all(|r| r.racecourse.id == group.racecourse.id));
            assert!(group.races.windows(2).all(|w| w[0].race_number <= w[1].race_number));
        }
        for r in &races {
            let hits = groups
                .iter()
                .flat_map(|g| &g.races)
                .filter(|x| x.id == r.id)
                .count();
            assert_eq!(hits, 1, "race {} should appear exactly once", r.id);
        }
    }

    #[test]
    fn test_duplicate_race_numbers_keep_input_order() {
        let tokyo = course("rc-05", "東京");
        let races = vec![race("first", &tokyo, 5), race("x", &tokyo, 1), race("second", &tokyo, 5)];

        let groups = group_races_by_course(races);
        let ids: Vec<&str> = groups[0].races.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "first", "second"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_races_by_course(Vec::new()).is_empty());
    }

    #[test]
    fn test_races_on_filters_by_date() {
        let tokyo = course("rc-05", "東京");
        let mut other_day = race("b", &tokyo, 2);
        other_day.date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let races = vec![race("a", &tokyo, 1), other_day];

        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let ids: Vec<&str> = races_on(date, &races).map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }
}
