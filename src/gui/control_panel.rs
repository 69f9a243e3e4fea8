//! Control Panel Widget
//! Left side panel with the date-range selector and the window's summary.

use chrono::NaiveDate;
use egui::{Color32, RichText};

use crate::charts::ChartPlotter;
use crate::stats::DashboardView;

/// Actions triggered from the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    RangeChanged,
}

/// Date-range selector over the dataset's session dates.
pub struct ControlPanel {
    /// Distinct session dates, ascending.
    dates: Vec<NaiveDate>,
    start_idx: usize,
    end_idx: usize,
}

impl ControlPanel {
    /// Start with the full range selected.
    pub fn new(mut dates: Vec<NaiveDate>) -> Self {
        dates.sort();
        dates.dedup();
        let end_idx = dates.len().saturating_sub(1);
        Self {
            dates,
            start_idx: 0,
            end_idx,
        }
    }

    /// Selected `(start, end)`, inclusive.
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.dates.get(self.start_idx)?, *self.dates.get(self.end_idx)?))
    }

    pub fn reset(&mut self) {
        self.start_idx = 0;
        self.end_idx = self.dates.len().saturating_sub(1);
    }

    /// Move one bound; the other follows so the range never inverts.
    pub fn set_bounds(&mut self, start_idx: usize, end_idx: usize) {
        let last = self.dates.len().saturating_sub(1);
        let start_idx = start_idx.min(last);
        let end_idx = end_idx.min(last);

        let start_moved = start_idx != self.start_idx;
        self.start_idx = start_idx;
        self.end_idx = end_idx;

        if start_moved {
            self.end_idx = self.end_idx.max(self.start_idx);
        } else {
            self.start_idx = self.start_idx.min(self.end_idx);
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, view: &DashboardView) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚴 Cycling Training Dashboard")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Date Range Section =====
        ui.label(RichText::new("📅 Date Range").size(14.0).strong());
        ui.add_space(5.0);

        let last = self.dates.len().saturating_sub(1);
        let mut start_idx = self.start_idx;
        let mut end_idx = self.end_idx;
        let dates = &self.dates;
        let format_idx = |v: f64| {
            dates
                .get(v.round().max(0.0) as usize)
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_default()
        };

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("date_range")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("From:");
                        ui.add(
                            egui::Slider::new(&mut start_idx, 0..=last)
                                .custom_formatter(|v, _| format_idx(v)),
                        );
                        ui.end_row();

                        ui.label("To:");
                        ui.add(
                            egui::Slider::new(&mut end_idx, 0..=last)
                                .custom_formatter(|v, _| format_idx(v)),
                        );
                        ui.end_row();
                    });
            });

        if start_idx != self.start_idx || end_idx != self.end_idx {
            self.set_bounds(start_idx, end_idx);
            action = ControlPanelAction::RangeChanged;
        }

        ui.add_space(5.0);
        if ui.button("↺ Full range").clicked() {
            self.reset();
            action = ControlPanelAction::RangeChanged;
        }

        ui.add_space(10.0);
        ui.separator();

        // ===== Summary Section =====
        ui.label(RichText::new("📈 Summary").size(14.0).strong());
        ui.add_space(5.0);

        match &view.summary {
            Some(stats) => ChartPlotter::draw_stats_table(ui, stats),
            None => {
                ui.label(RichText::new("No sessions in range").color(Color32::GRAY));
            }
        }

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::date;

    #[test]
    fn starts_on_full_distinct_range() {
        let panel = ControlPanel::new(vec![date(9, 1, 2024), date(1, 1, 2024), date(9, 1, 2024)]);
        assert_eq!(panel.range(), Some((date(1, 1, 2024), date(9, 1, 2024))));
        assert_eq!(ControlPanel::new(Vec::new()).range(), None);
    }

    #[test]
    fn bounds_never_invert() {
        let mut panel = ControlPanel::new(vec![
            date(1, 1, 2024),
            date(2, 1, 2024),
            date(3, 1, 2024),
            date(4, 1, 2024),
        ]);

        panel.set_bounds(1, 1);
        assert_eq!(panel.range(), Some((date(2, 1, 2024), date(2, 1, 2024))));

        // Start dragged past the end pushes the end along
        panel.set_bounds(3, 1);
        assert_eq!(panel.range(), Some((date(4, 1, 2024), date(4, 1, 2024))));

        // End dragged before the start pulls the start along
        panel.set_bounds(3, 0);
        assert_eq!(panel.range(), Some((date(1, 1, 2024), date(1, 1, 2024))));

        panel.reset();
        assert_eq!(panel.range(), Some((date(1, 1, 2024), date(4, 1, 2024))));

        // Both bounds moved in one frame
        panel.set_bounds(1, 2);
        assert_eq!(panel.range(), Some((date(2, 1, 2024), date(3, 1, 2024))));
    }

    #[test]
    fn out_of_range_indices_clamp_to_last_date() {
        let mut panel = ControlPanel::new(vec![date(1, 1, 2024), date(2, 1, 2024)]);
        panel.set_bounds(0, 10);
        assert_eq!(panel.range(), Some((date(1, 1, 2024), date(2, 1, 2024))));
    }
}
