//! Per-ISO-week heart-rate aggregation.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

use crate::data::WorkoutRecord;

/// Mean heart rate of one ISO calendar week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyAggregate {
    /// ISO week label, e.g. `"2024-W01"`.
    pub week: String,
    /// Monday of the week.
    pub week_start: NaiveDate,
    pub session_count: usize,
    pub mean_heart_rate: f64,
}

/// ISO week label of a date.
pub fn iso_week_label(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

/// Group records by the ISO week containing their date, ordered by week start.
pub fn weekly_aggregate(records: &[WorkoutRecord]) -> Vec<WeeklyAggregate> {
    let mut weeks: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for record in records {
        let monday = record.date.week(Weekday::Mon).first_day();
        weeks.entry(monday).or_default().push(record.avg_heart_rate);
    }

    weeks
        .into_iter()
        .map(|(week_start, heart_rates)| WeeklyAggregate {
            week: iso_week_label(week_start),
            week_start,
            session_count: heart_rates.len(),
            mean_heart_rate: heart_rates.iter().mean(),
        })
        .collect()
}
