//! Cycling Dashboard - training log analysis
//!
//! Loads a cycling-workout CSV, cleans unit-tagged values, aggregates summary
//! statistics and renders them as a static HTML report or an interactive
//! desktop dashboard.

pub mod charts;
pub mod data;
pub mod gui;
pub mod report;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support;

/// Training log read when no `--input` is given.
pub const DEFAULT_INPUT: &str = "Training_Data - Cycling.csv";
