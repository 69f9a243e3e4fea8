//! Data Cleaner Module
//! Turns raw rows into unit-normalized workout records.

use chrono::NaiveDate;

use super::columns::{Field, DATE_FORMAT};
use super::dataset::{Dataset, WorkoutRecord};
use super::loader::RawRow;

/// Row-level cleaning. Failures drop the row, they are never errors.
pub struct DataCleaner;

impl DataCleaner {
    /// Parse a `DD/MM/YY` date.
    pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw?.trim(), DATE_FORMAT).ok()
    }

    /// Clean one row, or `None` when the date or a required metric is unusable.
    pub fn clean(row: &RawRow) -> Option<WorkoutRecord> {
        let metric = |field: Field| field.spec().normalize(row.get(field));

        let Some(date) = Self::parse_date(row.get(Field::Date)) else {
            log::debug!("dropping row: unparseable date {:?}", row.get(Field::Date));
            return None;
        };

        let required = [
            Field::AvgHeartRate,
            Field::AvgSpeed,
            Field::AvgPower,
            Field::AvgCadence,
        ];
        let mut values = [0.0; 4];
        for (slot, field) in values.iter_mut().zip(required) {
            match metric(field) {
                Some(v) => *slot = v,
                None => {
                    log::debug!(
                        "dropping row {}: {} is {:?}",
                        date,
                        field.header(),
                        row.get(field)
                    );
                    return None;
                }
            }
        }
        let [avg_heart_rate, avg_speed, avg_power, avg_cadence] = values;

        Some(WorkoutRecord {
            date,
            avg_heart_rate,
            avg_speed,
            avg_power,
            avg_cadence,
            calories_burned: metric(Field::CaloriesBurned),
        })
    }

    /// Clean every row, keeping survivors in input order.
    pub fn clean_all(rows: &[RawRow]) -> Dataset {
        let records: Vec<WorkoutRecord> = rows.iter().filter_map(Self::clean).collect();

        log::info!(
            "Cleaned {} rows: {} kept, {} dropped",
            rows.len(),
            records.len(),
            rows.len() - records.len()
        );

        Dataset::from_records(records).with_raw_row_count(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, bpm: &str, speed: &str, watt: &str, rpm: &str) -> RawRow {
        RawRow::new()
            .with(Field::Date, date)
            .with(Field::AvgHeartRate, bpm)
            .with(Field::AvgSpeed, speed)
            .with(Field::AvgPower, watt)
            .with(Field::AvgCadence, rpm)
    }

    #[test]
    fn parses_day_month_short_year() {
        assert_eq!(
            DataCleaner::parse_date(Some("03/02/24")),
            NaiveDate::from_ymd_opt(2024, 2, 3)
        );
        assert_eq!(DataCleaner::parse_date(Some("2024-02-03")), None);
        assert_eq!(DataCleaner::parse_date(Some("31/02/24")), None);
        assert_eq!(DataCleaner::parse_date(None), None);
    }

    #[test]
    fn clean_normalizes_units() {
        let raw = row("01/01/24", "80 bpm", "15 MPH", "200", "90 rpm").with(Field::CaloriesBurned, "450");
        let record = DataCleaner::clean(&raw).unwrap();

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(record.avg_heart_rate, 80.0);
        assert_eq!(record.avg_speed, 15.0);
        assert_eq!(record.avg_power, 200.0);
        assert_eq!(record.avg_cadence, 90.0);
        assert_eq!(record.calories_burned, Some(450.0));
    }

    #[test]
    fn missing_calories_keep_the_row() {
        let raw = row("01/01/24", "80 bpm", "15", "200", "90");
        let record = DataCleaner::clean(&raw).unwrap();
        assert_eq!(record.calories_burned, None);

        let raw = raw.with(Field::CaloriesBurned, "n/a");
        assert_eq!(DataCleaner::clean(&raw).unwrap().calories_burned, None);
    }

    #[test]
    fn any_missing_required_field_drops_the_row() {
        assert!(DataCleaner::clean(&row("01/01/24", "invalid", "16", "210", "91")).is_none());
        assert!(DataCleaner::clean(&row("01/01/24", "80", "", "210", "91")).is_none());
        assert!(DataCleaner::clean(&row("01/01/24", "80", "16", "watts", "91")).is_none());
        assert!(DataCleaner::clean(&row("bad", "80", "16", "210", "91")).is_none());

        let no_cadence = RawRow::new()
            .with(Field::Date, "01/01/24")
            .with(Field::AvgHeartRate, "80")
            .with(Field::AvgSpeed, "16")
            .with(Field::AvgPower, "210");
        assert!(DataCleaner::clean(&no_cadence).is_none());
    }

    #[test]
    fn dropping_a_row_leaves_others_untouched() {
        let good = vec![
            row("01/01/24", "80 bpm", "15 MPH", "200", "90 rpm"),
            row("03/01/24", "85 bpm", "17 MPH", "220", "92 rpm"),
        ];
        let mut with_bad = good.clone();
        with_bad.insert(1, row("02/01/24", "invalid", "16", "210", "91"));

        let clean = DataCleaner::clean_all(&good);
        let dirty = DataCleaner::clean_all(&with_bad);

        assert_eq!(dirty.len(), with_bad.len() - 1);
        assert_eq!(dirty.dropped_row_count(), 1);
        assert_eq!(clean.records(), dirty.records());
    }
}
