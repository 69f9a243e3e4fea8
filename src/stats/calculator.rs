//! Statistics Calculator Module
//! Summary statistics, Pearson correlation and least-squares trendlines.

use chrono::NaiveDate;
use serde::Serialize;
use statrs::statistics::Statistics;
use thiserror::Error;

use crate::data::{Field, WorkoutRecord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("no workout records left to aggregate (all rows empty or dropped during cleaning)")]
    EmptyDataset,
}

/// The four required numeric metrics of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    HeartRate,
    Speed,
    Power,
    Cadence,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::HeartRate,
        Metric::Speed,
        Metric::Power,
        Metric::Cadence,
    ];

    pub fn field(self) -> Field {
        match self {
            Metric::HeartRate => Field::AvgHeartRate,
            Metric::Speed => Field::AvgSpeed,
            Metric::Power => Field::AvgPower,
            Metric::Cadence => Field::AvgCadence,
        }
    }

    /// Display label, e.g. "Avg BPM".
    pub fn label(self) -> &'static str {
        match self {
            Metric::HeartRate => "Avg BPM",
            Metric::Speed => "Avg Speed",
            Metric::Power => "Avg Watt",
            Metric::Cadence => "Avg RPM",
        }
    }

    pub fn value(self, record: &WorkoutRecord) -> f64 {
        match self {
            Metric::HeartRate => record.avg_heart_rate,
            Metric::Speed => record.avg_speed,
            Metric::Power => record.avg_power,
            Metric::Cadence => record.avg_cadence,
        }
    }
}

/// Scalar aggregates over a record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub session_count: usize,
    pub mean_heart_rate: f64,
    pub max_heart_rate: f64,
    pub min_heart_rate: f64,
    /// Session count / 60, a proxy for hours trained.
    pub total_time: f64,
    pub avg_speed: f64,
    pub avg_power: f64,
    pub avg_cadence: f64,
    /// Date of the lowest average heart-rate session.
    pub most_efficient_session: NaiveDate,
    /// Date of the highest average heart-rate session.
    pub most_intense_session: NaiveDate,
}

/// One point of the heart-rate-over-time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeartRatePoint {
    pub date: NaiveDate,
    pub avg_heart_rate: f64,
    pub predicted_resting_heart_rate: Option<f64>,
}

/// Pearson correlation between every pair of metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub metrics: [Metric; 4],
    /// `values[i][j]` correlates `metrics[i]` with `metrics[j]`;
    /// `None` when undefined (fewer than two samples or zero variance).
    pub values: [[Option<f64>; 4]; 4],
}

impl CorrelationMatrix {
    pub fn get(&self, a: Metric, b: Metric) -> Option<f64> {
        let i = self.metrics.iter().position(|&m| m == a)?;
        let j = self.metrics.iter().position(|&m| m == b)?;
        self.values[i][j]
    }
}

/// Ordinary least squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trendline {
    pub slope: f64,
    pub intercept: f64,
}

impl Trendline {
    /// Fit a line through `(x, y)` points. `None` below two points or for constant `x`.
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }

        let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.1).collect();

        let var_x = xs.iter().variance();
        if !var_x.is_finite() || var_x == 0.0 {
            return None;
        }

        let slope = xs.iter().covariance(ys.iter()) / var_x;
        let intercept = ys.iter().mean() - slope * xs.iter().mean();

        Some(Self { slope, intercept })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// End points of the line across the `x` extent of `points`.
    pub fn segment(&self, points: &[(f64, f64)]) -> Option<[(f64, f64); 2]> {
        let (lo, hi) = x_extent(points)?;
        Some([(lo, self.predict(lo)), (hi, self.predict(hi))])
    }
}

fn x_extent(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }
    let lo = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let hi = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    Some((lo, hi))
}

/// Pearson correlation of two equally long samples.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let sd_x = xs.iter().std_dev();
    let sd_y = ys.iter().std_dev();
    if sd_x == 0.0 || sd_y == 0.0 {
        return None;
    }

    let r = xs.iter().covariance(ys.iter()) / (sd_x * sd_y);
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Stateless aggregation over workout records.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute the summary statistics of a non-empty record set.
    pub fn summarize(records: &[WorkoutRecord]) -> Result<SummaryStats, StatsError> {
        let first = records.first().ok_or(StatsError::EmptyDataset)?;

        // Strict comparisons keep the first session on ties
        let mut lowest = first;
        let mut highest = first;
        for record in records {
            if record.avg_heart_rate < lowest.avg_heart_rate {
                lowest = record;
            }
            if record.avg_heart_rate > highest.avg_heart_rate {
                highest = record;
            }
        }

        let mean_of = |metric: Metric| records.iter().map(|r| metric.value(r)).mean();

        Ok(SummaryStats {
            session_count: records.len(),
            mean_heart_rate: mean_of(Metric::HeartRate),
            max_heart_rate: highest.avg_heart_rate,
            min_heart_rate: lowest.avg_heart_rate,
            total_time: records.len() as f64 / 60.0,
            avg_speed: mean_of(Metric::Speed),
            avg_power: mean_of(Metric::Power),
            avg_cadence: mean_of(Metric::Cadence),
            most_efficient_session: lowest.date,
            most_intense_session: highest.date,
        })
    }

    /// Pearson correlation matrix across the four metrics.
    pub fn correlation_matrix(records: &[WorkoutRecord]) -> Result<CorrelationMatrix, StatsError> {
        if records.is_empty() {
            return Err(StatsError::EmptyDataset);
        }

        let columns: Vec<Vec<f64>> = Metric::ALL
            .iter()
            .map(|m| records.iter().map(|r| m.value(r)).collect())
            .collect();

        let mut values = [[None; 4]; 4];
        for i in 0..4 {
            for j in i..4 {
                let r = pearson(&columns[i], &columns[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(CorrelationMatrix {
            metrics: Metric::ALL,
            values,
        })
    }

    /// Heart rate by date, date-sorted. Same-day sessions keep file order.
    pub fn heart_rate_trend(records: &[WorkoutRecord]) -> Vec<HeartRatePoint> {
        let mut points: Vec<HeartRatePoint> = records
            .iter()
            .map(|r| HeartRatePoint {
                date: r.date,
                avg_heart_rate: r.avg_heart_rate,
                predicted_resting_heart_rate: r.predicted_resting_heart_rate(),
            })
            .collect();
        points.sort_by_key(|p| p.date);
        points
    }

    /// `(x, avg heart rate)` pairs for a scatter chart against `metric`.
    pub fn heart_rate_scatter(records: &[WorkoutRecord], metric: Metric) -> Vec<(f64, f64)> {
        records
            .iter()
            .map(|r| (metric.value(r), r.avg_heart_rate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, record};

    const EPS: f64 = 1e-9;

    #[test]
    fn summarize_empty_is_an_error() {
        assert_eq!(
            StatsCalculator::summarize(&[]),
            Err(StatsError::EmptyDataset)
        );
        assert!(StatsCalculator::correlation_matrix(&[]).is_err());
    }

    #[test]
    fn summarize_basic_stats() {
        let mut records = vec![
            record(date(1, 1, 2024), 120.0),
            record(date(2, 1, 2024), 150.0),
            record(date(3, 1, 2024), 90.0),
            record(date(4, 1, 2024), 150.0),
        ];
        records[0].avg_speed = 10.0;
        records[1].avg_speed = 20.0;

        let stats = StatsCalculator::summarize(&records).unwrap();
        assert_eq!(stats.session_count, 4);
        assert!((stats.mean_heart_rate - 127.5).abs() < EPS);
        assert_eq!(stats.min_heart_rate, 90.0);
        assert_eq!(stats.max_heart_rate, 150.0);
        assert!((stats.total_time - 4.0 / 60.0).abs() < EPS);
        assert!((stats.avg_speed - 15.0).abs() < EPS);
        assert!((stats.avg_power - 200.0).abs() < EPS);
        assert!((stats.avg_cadence - 90.0).abs() < EPS);
        assert_eq!(stats.most_efficient_session, date(3, 1, 2024));
        // Tie on 150 picks the first session
        assert_eq!(stats.most_intense_session, date(2, 1, 2024));
    }

    #[test]
    fn mean_lies_between_min_and_max() {
        let samples: [&[f64]; 4] = [
            &[80.0],
            &[60.0, 200.0],
            &[101.5, 99.25, 150.0, 42.0, 42.0],
            &[1e-3, 1e3, 77.7],
        ];
        for sample in samples {
            let records: Vec<_> = sample
                .iter()
                .enumerate()
                .map(|(i, &bpm)| record(date(1 + i as u32, 3, 2024), bpm))
                .collect();
            let stats = StatsCalculator::summarize(&records).unwrap();
            assert!(stats.min_heart_rate <= stats.mean_heart_rate + EPS);
            assert!(stats.mean_heart_rate <= stats.max_heart_rate + EPS);
        }
    }

    #[test]
    fn pearson_perfect_and_undefined() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        let neg = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&xs, &ys).unwrap() - 1.0).abs() < EPS);
        assert!((pearson(&xs, &neg).unwrap() + 1.0).abs() < EPS);
        assert_eq!(pearson(&xs, &[5.0; 4]), None);
        assert_eq!(pearson(&[1.0], &[2.0]), None);
        assert_eq!(pearson(&xs, &ys[..3]), None);
    }

    #[test]
    fn correlation_matrix_is_symmetric() {
        let mut records = vec![
            record(date(1, 1, 2024), 120.0),
            record(date(2, 1, 2024), 130.0),
            record(date(3, 1, 2024), 145.0),
        ];
        for (i, r) in records.iter_mut().enumerate() {
            r.avg_speed = 14.0 + i as f64;
            r.avg_power = 300.0 - 20.0 * (i * i) as f64;
        }

        let matrix = StatsCalculator::correlation_matrix(&records).unwrap();
        for a in Metric::ALL {
            for b in Metric::ALL {
                assert_eq!(matrix.get(a, b), matrix.get(b, a));
            }
        }
        assert!((matrix.get(Metric::HeartRate, Metric::HeartRate).unwrap() - 1.0).abs() < EPS);
        assert!(matrix.get(Metric::HeartRate, Metric::Speed).unwrap() > 0.9);
        assert!(matrix.get(Metric::Speed, Metric::Power).unwrap() < 0.0);
        // Cadence is constant in the fixture
        assert_eq!(matrix.get(Metric::Cadence, Metric::HeartRate), None);
        assert_eq!(matrix.get(Metric::Cadence, Metric::Cadence), None);
    }

    #[test]
    fn heart_rate_trend_is_date_sorted() {
        let mut late = record(date(9, 1, 2024), 140.0);
        late.calories_burned = Some(700.0);
        let records = vec![late, record(date(1, 1, 2024), 120.0), record(date(9, 1, 2024), 150.0)];

        let trend = StatsCalculator::heart_rate_trend(&records);
        let bpm: Vec<f64> = trend.iter().map(|p| p.avg_heart_rate).collect();
        assert_eq!(bpm, [120.0, 140.0, 150.0]);
        assert_eq!(trend[1].predicted_resting_heart_rate, Some(133.0));
        assert_eq!(trend[2].predicted_resting_heart_rate, None);
    }

    #[test]
    fn trendline_fits_exact_line() {
        let points = [(1.0, 5.0), (2.0, 7.0), (3.0, 9.0), (4.0, 11.0)];
        let line = Trendline::fit(&points).unwrap();
        assert!((line.slope - 2.0).abs() < EPS);
        assert!((line.intercept - 3.0).abs() < EPS);

        let [(x0, y0), (x1, y1)] = line.segment(&points).unwrap();
        assert_eq!((x0, x1), (1.0, 4.0));
        assert!((y0 - 5.0).abs() < EPS && (y1 - 11.0).abs() < EPS);
    }

    #[test]
    fn trendline_undefined_inputs() {
        assert_eq!(Trendline::fit(&[]), None);
        assert_eq!(Trendline::fit(&[(1.0, 2.0)]), None);
        assert_eq!(Trendline::fit(&[(1.0, 2.0), (1.0, 3.0)]), None);
    }
}
