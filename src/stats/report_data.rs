//! Everything the static report needs, computed once at build time.

use super::calculator::{
    CorrelationMatrix, HeartRatePoint, Metric, StatsCalculator, StatsError, SummaryStats,
    Trendline,
};
use super::weekly::{weekly_aggregate, WeeklyAggregate};
use super::zones::{efficiency_series, heart_rate_zones, power_zones, EfficiencyPoint, ZoneCounts};
use crate::data::Dataset;

/// A scatter series against heart rate with its OLS fit.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub metric: Metric,
    pub points: Vec<(f64, f64)>,
    pub trend: Option<Trendline>,
}

impl ScatterSeries {
    fn against_heart_rate(dataset: &Dataset, metric: Metric) -> Self {
        let points = StatsCalculator::heart_rate_scatter(dataset.records(), metric);
        Self {
            metric,
            trend: Trendline::fit(&points),
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub summary: SummaryStats,
    pub correlation: CorrelationMatrix,
    pub weekly: Vec<WeeklyAggregate>,
    pub heart_rate_trend: Vec<HeartRatePoint>,
    pub speed_vs_heart_rate: ScatterSeries,
    pub power_vs_heart_rate: ScatterSeries,
    pub heart_rate_zones: ZoneCounts,
    pub power_zones: ZoneCounts,
    pub efficiency: Vec<EfficiencyPoint>,
}

impl ReportData {
    pub fn build(dataset: &Dataset) -> Result<Self, StatsError> {
        let records = dataset.records();

        Ok(Self {
            summary: StatsCalculator::summarize(records)?,
            correlation: StatsCalculator::correlation_matrix(records)?,
            weekly: weekly_aggregate(records),
            heart_rate_trend: StatsCalculator::heart_rate_trend(records),
            speed_vs_heart_rate: ScatterSeries::against_heart_rate(dataset, Metric::Speed),
            power_vs_heart_rate: ScatterSeries::against_heart_rate(dataset, Metric::Power),
            heart_rate_zones: heart_rate_zones(records),
            power_zones: power_zones(records),
            efficiency: efficiency_series(records),
        })
    }
}
