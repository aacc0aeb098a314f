//! Training time series reduction for tables and charts

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{TrainingCourse, TrainingData};

/// Chart domain used when there are no times to scale against
const DEFAULT_DOMAIN: TimeDomain = TimeDomain { min: 11.0, max: 14.0 };

/// One plotted session: its up time sits in the slot for its course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub course: TrainingCourse,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub slope: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cw: Option<f64>,
}

impl ChartPoint {
    /// Up time regardless of course
    pub fn up_time(&self) -> Option<f64> {
        self.slope.or(self.cw)
    }
}

/// Y-axis range in seconds (rendered reversed: lower is faster)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeDomain {
    pub min: f64,
    pub max: f64,
}

/// Reduce sessions to chart points, oldest first
///
/// Each point carries the session's last split (the up time). Sessions
/// with no splits produce a point with both slots empty. Sessions on the
/// same date keep their input order.
pub fn to_chart_points(trainings: &[TrainingData]) -> Vec<ChartPoint> {
    let mut sorted: Vec<&TrainingData> = trainings.iter().collect();
    sorted.sort_by_key(|t| t.date);

    sorted
        .into_iter()
        .map(|t| {
            let up_time = t.times.last().copied();
            let (slope, cw) = match t.course {
                TrainingCourse::Slope => (up_time, None),
                TrainingCourse::Cw => (None, up_time),
            };
            ChartPoint {
                date: t.date,
                course: t.course,
                slope,
                cw,
            }
        })
        .collect()
}

/// Axis range padded half a second around every split, snapped to whole seconds
pub fn chart_time_domain(trainings: &[TrainingData]) -> TimeDomain {
    let mut all_times = trainings.iter().flat_map(|t| t.times.iter().copied());
    let Some(first) = all_times.next() else {
        return DEFAULT_DOMAIN;
    };

    let (min, max) = all_times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    TimeDomain {
        min: (min - 0.5).floor(),
        max: (max + 0.5).ceil(),
    }
}

/// Splits for display, e.g. `"13.2 - 12.8 - 12.5"`
pub fn format_training_times(times: &[f64]) -> String {
    times
        .iter()
        .map(|t| format!("{:.1}", t))
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Table order: most recent session first
pub fn sort_newest_first(trainings: &mut [TrainingData]) {
    trainings.sort_by(|a, b| b.date.cmp(&a.date));
}
