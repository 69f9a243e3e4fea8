//! Workout records and the immutable dataset handle.

use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::cleaner::DataCleaner;
use super::loader::{DataLoadError, DataLoader};

/// One cleaned, unit-normalized training session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkoutRecord {
    pub date: NaiveDate,
    pub avg_heart_rate: f64,
    pub avg_speed: f64,
    pub avg_power: f64,
    pub avg_cadence: f64,
    pub calories_burned: Option<f64>,
}

impl WorkoutRecord {
    /// `avg_heart_rate - calories_burned / 100`, unclamped.
    pub fn predicted_resting_heart_rate(&self) -> Option<f64> {
        self.calories_burned
            .map(|calories| self.avg_heart_rate - calories / 100.0)
    }
}

/// Cleaned records of one training log, in file order.
///
/// Built once and only read afterwards; every computation borrows it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<WorkoutRecord>,
    source: Option<PathBuf>,
    raw_row_count: usize,
}

impl Dataset {
    /// Load and clean a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let rows = DataLoader::load_csv(path)?;
        let mut dataset = DataCleaner::clean_all(&rows);
        dataset.source = Some(path.to_path_buf());
        Ok(dataset)
    }

    pub fn from_records(records: Vec<WorkoutRecord>) -> Self {
        let raw_row_count = records.len();
        Self {
            records,
            source: None,
            raw_row_count,
        }
    }

    pub(crate) fn with_raw_row_count(mut self, raw_row_count: usize) -> Self {
        self.raw_row_count = raw_row_count;
        self
    }

    pub fn records(&self) -> &[WorkoutRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Rows read from the source before cleaning.
    pub fn raw_row_count(&self) -> usize {
        self.raw_row_count
    }

    /// Rows excluded by the cleaner.
    pub fn dropped_row_count(&self) -> usize {
        self.raw_row_count.saturating_sub(self.records.len())
    }

    /// Earliest and latest session dates.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(|r| r.date).min()?;
        let last = self.records.iter().map(|r| r.date).max()?;
        Some((first, last))
    }
}

/// Records whose date lies in `start..=end`, in input order.
pub fn filter_by_date_range(
    records: &[WorkoutRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<WorkoutRecord> {
    records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, record};

    #[test]
    fn predicted_resting_heart_rate_may_go_negative() {
        let mut r = record(date(1, 1, 2024), 80.0);
        assert_eq!(r.predicted_resting_heart_rate(), None);

        r.calories_burned = Some(500.0);
        assert_eq!(r.predicted_resting_heart_rate(), Some(75.0));

        r.calories_burned = Some(10_000.0);
        assert_eq!(r.predicted_resting_heart_rate(), Some(-20.0));
    }

    #[test]
    fn filter_single_day_returns_that_day_only() {
        let records = vec![
            record(date(1, 1, 2024), 80.0),
            record(date(2, 1, 2024), 81.0),
            record(date(2, 1, 2024), 82.0),
            record(date(3, 1, 2024), 83.0),
        ];

        let day = date(2, 1, 2024);
        let filtered = filter_by_date_range(&records, day, day);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.date == day));
        assert_eq!(filtered[0].avg_heart_rate, 81.0);
    }

    #[test]
    fn filter_bounds_are_inclusive() {
        let records = vec![
            record(date(1, 1, 2024), 80.0),
            record(date(5, 1, 2024), 81.0),
            record(date(9, 1, 2024), 82.0),
        ];

        let filtered = filter_by_date_range(&records, date(1, 1, 2024), date(5, 1, 2024));
        assert_eq!(filtered.len(), 2);

        let reversed = filter_by_date_range(&records, date(9, 1, 2024), date(1, 1, 2024));
        assert!(reversed.is_empty());
    }

    #[test]
    fn date_bounds_ignore_file_order() {
        let dataset = Dataset::from_records(vec![
            record(date(5, 1, 2024), 80.0),
            record(date(1, 1, 2024), 81.0),
            record(date(9, 1, 2024), 82.0),
        ]);
        assert_eq!(
            dataset.date_bounds(),
            Some((date(1, 1, 2024), date(9, 1, 2024)))
        );
        assert_eq!(Dataset::default().date_bounds(), None);
    }
}
