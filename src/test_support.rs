//! Shared fixtures for unit tests.

use chrono::NaiveDate;

use crate::data::WorkoutRecord;

pub(crate) fn date(d: u32, m: u32, y: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn record(day: NaiveDate, bpm: f64) -> WorkoutRecord {
    WorkoutRecord {
        date: day,
        avg_heart_rate: bpm,
        avg_speed: 15.0,
        avg_power: 200.0,
        avg_cadence: 90.0,
        calories_burned: None,
    }
}
