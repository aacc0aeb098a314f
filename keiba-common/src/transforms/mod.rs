//! Pure reshaping of fetched collections for display

pub mod card;
pub mod races;
pub mod search;
pub mod training;

pub use card::{build_race_card, recent_form, CardEntry, RaceCard, RECENT_FORM_LIMIT};
pub use races::{group_races_by_course, races_on, RacecourseGroup};
pub use search::{matches_name, search_horses};
pub use training::{
    chart_time_domain, format_training_times, sort_newest_first, to_chart_points, ChartPoint,
    TimeDomain,
};
