//! CSV Data Loader Module
//! Reads the training log with Polars and validates its header.

use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::columns::{Field, COLUMNS};

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("CSV file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("CSV header is missing column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// One CSV row before cleaning. Empty cells are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: HashMap<Field, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, handy for constructing rows by hand.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.cells.insert(field, value.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.cells.get(&field).map(String::as_str)
    }
}

/// Loads the training log. One-shot: no retries, no caching.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file into raw rows, every cell read as text.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<RawRow>, DataLoadError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DataLoadError::NotFound(path.to_path_buf()));
        }

        log::info!("Loading {:?}...", path);

        // A zero-row inference window keeps every column as String
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        let rows = Self::rows_from_dataframe(&df)?;
        log::info!("... loaded {} rows", rows.len());
        Ok(rows)
    }

    /// Validate the header of an already-loaded table and extract its rows.
    pub fn rows_from_dataframe(df: &DataFrame) -> Result<Vec<RawRow>, DataLoadError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let missing: Vec<String> = COLUMNS
            .iter()
            .filter(|spec| !names.iter().any(|n| n == spec.header))
            .map(|spec| spec.header.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DataLoadError::MissingColumns(missing));
        }

        let mut rows = vec![RawRow::default(); df.height()];
        for spec in &COLUMNS {
            let column = df.column(spec.header)?.cast(&DataType::String)?;
            let values = column.str()?;

            for (row, value) in rows.iter_mut().zip(values.into_iter()) {
                if let Some(value) = value {
                    row.set(spec.field, value);
                }
            }
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn training_frame() -> DataFrame {
        df!(
            "Date" => ["01/01/24", "02/01/24"],
            "Avg BPM" => [Some("80 bpm"), None],
            "Avg Speed (MPH)" => ["15 MPH", "16"],
            "Avg Watt" => ["200", "210"],
            "Avg RPM" => ["90 rpm", "91"],
            "Calories Burned" => ["500", "520"],
            "Notes" => ["easy", "hills"]
        )
        .unwrap()
    }

    #[test]
    fn rows_keep_order_and_nulls() {
        let rows = DataLoader::rows_from_dataframe(&training_frame()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(Field::Date), Some("01/01/24"));
        assert_eq!(rows[0].get(Field::AvgHeartRate), Some("80 bpm"));
        assert_eq!(rows[1].get(Field::AvgHeartRate), None);
        assert_eq!(rows[1].get(Field::AvgCadence), Some("91"));
    }

    #[test]
    fn numeric_columns_are_read_as_text() {
        let df = df!(
            "Date" => ["01/01/24"],
            "Avg BPM" => [80.5f64],
            "Avg Speed (MPH)" => [15i64],
            "Avg Watt" => [200i64],
            "Avg RPM" => [90i64],
            "Calories Burned" => [500i64]
        )
        .unwrap();

        let rows = DataLoader::rows_from_dataframe(&df).unwrap();
        assert_eq!(rows[0].get(Field::AvgHeartRate), Some("80.5"));
        assert_eq!(rows[0].get(Field::AvgPower), Some("200"));
    }

    #[test]
    fn missing_header_columns_are_reported() {
        let df = df!(
            "Date" => ["01/01/24"],
            "Avg BPM" => ["80 bpm"],
            "Avg Watt" => ["200"]
        )
        .unwrap();

        match DataLoader::rows_from_dataframe(&df) {
            Err(DataLoadError::MissingColumns(missing)) => {
                assert_eq!(
                    missing,
                    vec!["Avg Speed (MPH)", "Avg RPM", "Calories Burned"]
                );
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = DataLoader::load_csv("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, DataLoadError::NotFound(_)));
    }
}
