//! Cycling Dashboard Main Application
//! Main window with date-range control panel and chart viewer.

use egui::SidePanel;
use std::path::PathBuf;
use thiserror::Error;

use crate::data::{DataLoadError, Dataset};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::DashboardView;

const WINDOW_TITLE: &str = "Cycling Training Dashboard";

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] DataLoadError),
    #[error("no sessions left after cleaning; nothing to show")]
    EmptyDataset,
    #[error("dashboard window failed: {0}")]
    Ui(String),
}

/// Settings of one `dashboard` run.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub input: PathBuf,
    pub width: f32,
    pub height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(crate::DEFAULT_INPUT),
            width: 1400.0,
            height: 900.0,
        }
    }
}

/// Main application window.
///
/// Owns the dataset loaded at startup; the view is recomputed from it on
/// every range change.
pub struct DashboardApp {
    dataset: Dataset,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    view: DashboardView,
}

impl DashboardApp {
    pub fn new(dataset: Dataset) -> Result<Self, DashboardError> {
        let view = DashboardView::full_range(&dataset).ok_or(DashboardError::EmptyDataset)?;
        let control_panel = ControlPanel::new(dataset.records().iter().map(|r| r.date).collect());

        Ok(Self {
            dataset,
            control_panel,
            chart_viewer: ChartViewer::new(),
            view,
        })
    }

    /// Load the dataset and run the window until it is closed.
    pub fn run(config: &DashboardConfig) -> Result<(), DashboardError> {
        let dataset = Dataset::load(&config.input)?;
        let app = Self::new(dataset)?;

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([config.width, config.height])
                .with_min_inner_size([900.0, 600.0])
                .with_title(WINDOW_TITLE),
            ..Default::default()
        };

        eframe::run_native(
            WINDOW_TITLE,
            options,
            Box::new(move |_cc| Ok(Box::new(app))),
        )
        .map_err(|e| DashboardError::Ui(e.to_string()))
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    fn recompute(&mut self) {
        let Some((start, end)) = self.control_panel.range() else {
            return;
        };
        self.view = DashboardView::compute(&self.dataset, start, end);
        log::debug!(
            "range {} .. {}: {} sessions",
            start,
            end,
            self.view.records.len()
        );
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui, &self.view) {
                        ControlPanelAction::RangeChanged => self.recompute(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, &self.view);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, record};

    #[test]
    fn empty_dataset_cannot_open_a_dashboard() {
        assert!(matches!(
            DashboardApp::new(Dataset::default()),
            Err(DashboardError::EmptyDataset)
        ));
    }

    #[test]
    fn initial_view_covers_every_session() {
        let dataset = Dataset::from_records(vec![
            record(date(4, 1, 2024), 130.0),
            record(date(1, 1, 2024), 120.0),
        ]);
        let app = DashboardApp::new(dataset).unwrap();
        assert_eq!(app.view().records.len(), 2);
        assert_eq!(app.view().start, date(1, 1, 2024));
        assert_eq!(app.view().end, date(4, 1, 2024));
    }
}
