//! Human-readable summary stats.

use serde::Serialize;

use crate::stats::SummaryStats;

/// Summary stats rounded to one decimal place, session dates as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedStats {
    pub mean_heartrate: String,
    pub max_heartrate: String,
    pub min_heartrate: String,
    pub total_time: String,
    pub avg_speed: String,
    pub avg_power: String,
    pub avg_cadence: String,
    pub most_efficient_session: String,
    pub most_intense_session: String,
}

fn one_decimal(v: f64) -> String {
    format!("{:.1}", v)
}

impl From<&SummaryStats> for FormattedStats {
    fn from(stats: &SummaryStats) -> Self {
        Self {
            mean_heartrate: one_decimal(stats.mean_heart_rate),
            max_heartrate: one_decimal(stats.max_heart_rate),
            min_heartrate: one_decimal(stats.min_heart_rate),
            total_time: one_decimal(stats.total_time),
            avg_speed: one_decimal(stats.avg_speed),
            avg_power: one_decimal(stats.avg_power),
            avg_cadence: one_decimal(stats.avg_cadence),
            most_efficient_session: stats.most_efficient_session.format("%Y-%m-%d").to_string(),
            most_intense_session: stats.most_intense_session.format("%Y-%m-%d").to_string(),
        }
    }
}

impl FormattedStats {
    /// `(template key, value)` pairs, keys as used in `{{ stats.<key> }}`.
    pub fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("mean_heartrate", self.mean_heartrate.as_str()),
            ("max_heartrate", self.max_heartrate.as_str()),
            ("min_heartrate", self.min_heartrate.as_str()),
            ("total_time", self.total_time.as_str()),
            ("avg_speed", self.avg_speed.as_str()),
            ("avg_power", self.avg_power.as_str()),
            ("avg_cadence", self.avg_cadence.as_str()),
            ("most_efficient_session", self.most_efficient_session.as_str()),
            ("most_intense_session", self.most_intense_session.as_str()),
        ]
    }

    /// `(display label, value)` pairs for on-screen tables.
    pub fn rows(&self) -> [(&'static str, &str); 9] {
        [
            ("Mean heart rate (bpm)", self.mean_heartrate.as_str()),
            ("Max heart rate (bpm)", self.max_heartrate.as_str()),
            ("Min heart rate (bpm)", self.min_heartrate.as_str()),
            ("Total time", self.total_time.as_str()),
            ("Avg speed (mph)", self.avg_speed.as_str()),
            ("Avg power (W)", self.avg_power.as_str()),
            ("Avg cadence (rpm)", self.avg_cadence.as_str()),
            ("Most efficient session", self.most_efficient_session.as_str()),
            ("Most intense session", self.most_intense_session.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::date;

    #[test]
    fn rounds_to_one_decimal_and_formats_dates() {
        let stats = SummaryStats {
            session_count: 3,
            mean_heart_rate: 131.666_666,
            max_heart_rate: 150.0,
            min_heart_rate: 118.04,
            total_time: 0.05,
            avg_speed: 17.25,
            avg_power: 201.96,
            avg_cadence: 88.0,
            most_efficient_session: date(4, 2, 2024),
            most_intense_session: date(28, 12, 2023),
        };

        let f = FormattedStats::from(&stats);
        assert_eq!(f.mean_heartrate, "131.7");
        assert_eq!(f.max_heartrate, "150.0");
        assert_eq!(f.min_heartrate, "118.0");
        assert_eq!(f.total_time, "0.1");
        assert_eq!(f.avg_power, "202.0");
        assert_eq!(f.avg_cadence, "88.0");
        assert_eq!(f.most_efficient_session, "2024-02-04");
        assert_eq!(f.most_intense_session, "2023-12-28");
        assert_eq!(f.entries()[0], ("mean_heartrate", "131.7"));
    }
}
