//! Column Table Module
//! Declarative mapping from CSV header to field, unit suffix and requirement.

use serde::Serialize;

/// Fields of a training-log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Field {
    Date,
    AvgHeartRate,
    AvgSpeed,
    AvgPower,
    AvgCadence,
    CaloriesBurned,
}

/// One entry of the column table.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub field: Field,
    pub header: &'static str,
    /// Unit suffix the source usually carries, e.g. `"bpm"` in `"82 bpm"`.
    pub unit: Option<&'static str>,
    /// Rows where a required field fails to normalize are dropped.
    pub required: bool,
}

/// Every column the loader expects in the CSV header.
pub const COLUMNS: [ColumnSpec; 6] = [
    ColumnSpec {
        field: Field::Date,
        header: "Date",
        unit: None,
        required: true,
    },
    ColumnSpec {
        field: Field::AvgHeartRate,
        header: "Avg BPM",
        unit: Some("bpm"),
        required: true,
    },
    ColumnSpec {
        field: Field::AvgSpeed,
        header: "Avg Speed (MPH)",
        unit: Some("MPH"),
        required: true,
    },
    ColumnSpec {
        field: Field::AvgPower,
        header: "Avg Watt",
        unit: Some("W"),
        required: true,
    },
    ColumnSpec {
        field: Field::AvgCadence,
        header: "Avg RPM",
        unit: Some("rpm"),
        required: true,
    },
    ColumnSpec {
        field: Field::CaloriesBurned,
        header: "Calories Burned",
        unit: Some("kcal"),
        required: false,
    },
];

/// Source date format (`DD/MM/YY`).
pub const DATE_FORMAT: &str = "%d/%m/%y";

impl Field {
    /// Look up the column table entry for this field.
    pub fn spec(self) -> &'static ColumnSpec {
        match self {
            Field::Date => &COLUMNS[0],
            Field::AvgHeartRate => &COLUMNS[1],
            Field::AvgSpeed => &COLUMNS[2],
            Field::AvgPower => &COLUMNS[3],
            Field::AvgCadence => &COLUMNS[4],
            Field::CaloriesBurned => &COLUMNS[5],
        }
    }

    pub fn header(self) -> &'static str {
        self.spec().header
    }
}

impl ColumnSpec {
    /// Normalize a raw cell of this column.
    pub fn normalize(&self, raw: Option<&str>) -> Option<f64> {
        let value = normalize(raw)?;

        if let (Some(expected), Some(found)) = (self.unit, unit_suffix(raw)) {
            if !found.eq_ignore_ascii_case(expected) {
                log::debug!(
                    "{}: unexpected unit '{}' (expected '{}')",
                    self.header,
                    found,
                    expected
                );
            }
        }

        Some(value)
    }
}

/// Extract the leading numeric token of a cell and parse it as a float.
///
/// Accepts plain numbers (`"200"`) and numbers followed by a unit suffix
/// (`"82 bpm"`, `"21.4 MPH"`). Returns `None` for absent, empty, unparseable
/// and non-finite values.
pub fn normalize(raw: Option<&str>) -> Option<f64> {
    let token = raw?.split_whitespace().next()?;
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn unit_suffix(raw: Option<&str>) -> Option<&str> {
    let mut tokens = raw?.split_whitespace();
    tokens.next()?;
    tokens.next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_unit_suffix() {
        assert_eq!(normalize(Some("82 bpm")), Some(82.0));
        assert_eq!(normalize(Some("21.4 MPH")), Some(21.4));
        assert_eq!(normalize(Some("90 rpm")), Some(90.0));
        assert_eq!(normalize(Some("  210  ")), Some(210.0));
    }

    #[test]
    fn normalize_missing_values() {
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some("")), None);
        assert_eq!(normalize(Some("   ")), None);
        assert_eq!(normalize(Some("invalid")), None);
        assert_eq!(normalize(Some("bpm 82")), None);
        assert_eq!(normalize(Some("NaN")), None);
        assert_eq!(normalize(Some("inf rpm")), None);
    }

    #[test]
    fn normalize_matches_float_parse_for_any_unit() {
        for number in ["0", "7", "-3.5", "142.25", "1e2"] {
            for unit in ["bpm", "MPH", "rpm", "W", "whatever"] {
                let raw = format!("{} {}", number, unit);
                assert_eq!(normalize(Some(&raw)), number.parse::<f64>().ok());
            }
        }
    }

    #[test]
    fn column_table_lookup() {
        assert_eq!(Field::AvgHeartRate.header(), "Avg BPM");
        assert_eq!(Field::AvgSpeed.spec().unit, Some("MPH"));
        assert!(!Field::CaloriesBurned.spec().required);
        assert!(COLUMNS
            .iter()
            .filter(|c| c.field != Field::CaloriesBurned)
            .all(|c| c.required));
    }

    #[test]
    fn every_field_finds_its_own_column() {
        for column in &COLUMNS {
            assert_eq!(column.field.spec().field, column.field);
        }
        assert_eq!(Field::CaloriesBurned.header(), "Calories Burned");
        assert_eq!(Field::AvgCadence.header(), "Avg RPM");
    }

    #[test]
    fn column_normalize_accepts_other_units() {
        let spec = Field::AvgCadence.spec();
        assert_eq!(spec.normalize(Some("91 RPM")), Some(91.0));
        assert_eq!(spec.normalize(Some("91 spm")), Some(91.0));
        assert_eq!(spec.normalize(Some("")), None);
    }
}
