//! Stats module - aggregation over cleaned workout records

mod calculator;
mod dashboard;
mod report_data;
mod weekly;
mod zones;

pub use calculator::{
    pearson, CorrelationMatrix, HeartRatePoint, Metric, StatsCalculator, StatsError,
    SummaryStats, Trendline,
};
pub use dashboard::DashboardView;
pub use report_data::{ReportData, ScatterSeries};
pub use weekly::{iso_week_label, weekly_aggregate, WeeklyAggregate};
pub use zones::{
    efficiency_series, heart_rate_zones, power_zones, EfficiencyPoint, ZoneCounts,
    HEART_RATE_ZONES, POWER_ZONES,
};
