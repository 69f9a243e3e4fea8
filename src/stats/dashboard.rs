//! Dashboard view model.
//!
//! Everything the interactive dashboard shows for one date range, computed by
//! a single pure function. The UI calls it on every range change.

use chrono::NaiveDate;

use super::calculator::{HeartRatePoint, StatsCalculator, SummaryStats, Trendline};
use crate::data::{filter_by_date_range, Dataset, WorkoutRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub records: Vec<WorkoutRecord>,
    /// Avg BPM and predicted RHR by date.
    pub heart_rate_trend: Vec<HeartRatePoint>,
    /// `(calories burned, avg BPM)` for sessions with a calories value.
    pub calories_scatter: Vec<(f64, f64)>,
    pub calories_trend: Option<Trendline>,
    /// `None` when no session falls in the range.
    pub summary: Option<SummaryStats>,
}

impl DashboardView {
    pub fn compute(dataset: &Dataset, start: NaiveDate, end: NaiveDate) -> Self {
        let records = filter_by_date_range(dataset.records(), start, end);

        let calories_scatter: Vec<(f64, f64)> = records
            .iter()
            .filter_map(|r| r.calories_burned.map(|c| (c, r.avg_heart_rate)))
            .collect();

        Self {
            start,
            end,
            heart_rate_trend: StatsCalculator::heart_rate_trend(&records),
            calories_trend: Trendline::fit(&calories_scatter),
            calories_scatter,
            summary: StatsCalculator::summarize(&records).ok(),
            records,
        }
    }

    /// View over the dataset's whole date span, if it has any records.
    pub fn full_range(dataset: &Dataset) -> Option<Self> {
        let (start, end) = dataset.date_bounds()?;
        Some(Self::compute(dataset, start, end))
    }
}
