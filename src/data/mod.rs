//! Data module - CSV loading, cleaning and the dataset handle

mod cleaner;
mod columns;
mod dataset;
mod loader;

pub use cleaner::DataCleaner;
pub use columns::{normalize, ColumnSpec, Field, COLUMNS, DATE_FORMAT};
pub use dataset::{filter_by_date_range, Dataset, WorkoutRecord};
pub use loader::{DataLoadError, DataLoader, RawRow};
