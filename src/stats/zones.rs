//! Training zones and power efficiency.

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::WorkoutRecord;

/// Upper bounds (BPM, inclusive) of heart-rate zones 1-4; zone 5 is open.
pub const HEART_RATE_ZONES: [f64; 4] = [130.0, 140.0, 150.0, 160.0];
/// Upper bounds (W, inclusive) of power zones 1-4; zone 5 is open.
pub const POWER_ZONES: [f64; 4] = [180.0, 200.0, 220.0, 240.0];

/// Session counts per zone. `counts` has one more entry than `thresholds`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneCounts {
    pub thresholds: Vec<f64>,
    pub counts: Vec<usize>,
}

impl ZoneCounts {
    /// Count each value into the first zone whose bound it does not exceed.
    pub fn count(values: impl IntoIterator<Item = f64>, thresholds: &[f64]) -> Self {
        let mut counts = vec![0; thresholds.len() + 1];
        for value in values {
            let zone = thresholds
                .iter()
                .position(|&t| value <= t)
                .unwrap_or(thresholds.len());
            counts[zone] += 1;
        }
        Self {
            thresholds: thresholds.to_vec(),
            counts,
        }
    }

    /// `Z1 (≤130)` ... `Z5 (>160)`.
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .thresholds
            .iter()
            .enumerate()
            .map(|(i, t)| format!("Z{} (≤{})", i + 1, t))
            .collect();
        match self.thresholds.last() {
            Some(t) => labels.push(format!("Z{} (>{})", self.thresholds.len() + 1, t)),
            None => labels.push("Z1".to_string()),
        }
        labels
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

pub fn heart_rate_zones(records: &[WorkoutRecord]) -> ZoneCounts {
    ZoneCounts::count(records.iter().map(|r| r.avg_heart_rate), &HEART_RATE_ZONES)
}

pub fn power_zones(records: &[WorkoutRecord]) -> ZoneCounts {
    ZoneCounts::count(records.iter().map(|r| r.avg_power), &POWER_ZONES)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EfficiencyPoint {
    pub date: NaiveDate,
    /// MPH per 100 W.
    pub efficiency: f64,
}

/// Speed per 100 W of each session by date. Sessions without positive
/// power are skipped.
pub fn efficiency_series(records: &[WorkoutRecord]) -> Vec<EfficiencyPoint> {
    let mut points: Vec<EfficiencyPoint> = records
        .iter()
        .filter(|r| r.avg_power > 0.0)
        .map(|r| EfficiencyPoint {
            date: r.date,
            efficiency: r.avg_speed / (r.avg_power / 100.0),
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}
