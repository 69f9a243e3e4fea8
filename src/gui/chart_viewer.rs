//! Chart Viewer Widget
//! Central scrollable panel with the two dashboard charts.

use egui::{RichText, ScrollArea};

use crate::charts::ChartPlotter;
use crate::stats::DashboardView;

const CHART_SPACING: f32 = 15.0;
const MIN_CHART_HEIGHT: f32 = 220.0;

#[derive(Default)]
pub struct ChartViewer;

impl ChartViewer {
    pub fn new() -> Self {
        Self
    }

    /// Draw both charts for the current view, splitting the available height.
    pub fn show(&self, ui: &mut egui::Ui, view: &DashboardView) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!(
                    "{} – {}",
                    view.start.format("%d/%m/%Y"),
                    view.end.format("%d/%m/%Y")
                ))
                .size(14.0)
                .strong(),
            );
            ui.label(RichText::new(format!("({} sessions)", view.records.len())).size(12.0));
        });
        ui.add_space(CHART_SPACING / 2.0);

        if view.records.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        let height = ((ui.available_height() - 3.0 * CHART_SPACING) / 2.0 - 20.0).max(MIN_CHART_HEIGHT);

        ScrollArea::vertical().show(ui, |ui| {
            ChartPlotter::draw_heart_rate_trends(ui, view, height);
            ui.add_space(CHART_SPACING);
            ChartPlotter::draw_calories_scatter(ui, view, height);
        });
    }
}
