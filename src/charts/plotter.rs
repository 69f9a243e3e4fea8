//! Chart Plotter Module
//! Interactive dashboard charts using egui_plot.

use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use super::renderer::{day_label, day_number};
use crate::report::FormattedStats;
use crate::stats::{DashboardView, SummaryStats};

pub const HEART_RATE_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const RESTING_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red
pub const SCATTER_COLOR: Color32 = Color32::from_rgb(46, 204, 113); // Green
pub const TREND_COLOR: Color32 = Color32::from_rgb(243, 156, 18); // Orange

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Line chart of Avg BPM and predicted RHR by date, with markers.
    pub fn draw_heart_rate_trends(ui: &mut egui::Ui, view: &DashboardView, height: f32) {
        let bpm: Vec<[f64; 2]> = view
            .heart_rate_trend
            .iter()
            .map(|p| [day_number(p.date), p.avg_heart_rate])
            .collect();
        let rhr: Vec<[f64; 2]> = view
            .heart_rate_trend
            .iter()
            .filter_map(|p| {
                p.predicted_resting_heart_rate
                    .map(|v| [day_number(p.date), v])
            })
            .collect();

        ui.label(RichText::new("Heart Rate Trends").size(16.0).strong());
        Plot::new("heart_rate_trends")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Date")
            .y_axis_label("Heart Rate (BPM)")
            .x_axis_formatter(|mark, _range| day_label(mark.value))
            .label_formatter(|name, value| {
                format!("{}\n{}: {:.1}", day_label(value.x), name, value.y)
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(bpm.iter().copied()))
                        .color(HEART_RATE_COLOR)
                        .width(2.0)
                        .name("Avg BPM"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(bpm.iter().copied()))
                        .radius(3.0)
                        .color(HEART_RATE_COLOR),
                );

                if !rhr.is_empty() {
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(rhr.iter().copied()))
                            .color(RESTING_COLOR)
                            .width(2.0)
                            .name("Predicted RHR"),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(rhr.iter().copied()))
                            .radius(3.0)
                            .color(RESTING_COLOR),
                    );
                }
            });
    }

    /// Scatter of calories burned vs Avg BPM with an OLS trendline.
    pub fn draw_calories_scatter(ui: &mut egui::Ui, view: &DashboardView, height: f32) {
        let points: Vec<[f64; 2]> = view.calories_scatter.iter().map(|&(x, y)| [x, y]).collect();
        let trend = view
            .calories_trend
            .and_then(|t| t.segment(&view.calories_scatter));

        ui.label(RichText::new("Calories Burned vs Avg BPM").size(16.0).strong());
        Plot::new("calories_scatter")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Calories Burned (kcal)")
            .y_axis_label("Avg BPM")
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(4.0)
                        .color(SCATTER_COLOR)
                        .name("Sessions"),
                );

                if let Some([(x0, y0), (x1, y1)]) = trend {
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter([[x0, y0], [x1, y1]]))
                            .color(TREND_COLOR)
                            .width(2.0)
                            .name("OLS trend"),
                    );
                }
            });
    }

    /// Two-column grid of the formatted summary stats.
    pub fn draw_stats_table(ui: &mut egui::Ui, stats: &SummaryStats) {
        let formatted = FormattedStats::from(stats);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("summary_stats")
                    .striped(true)
                    .num_columns(2)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Sessions").strong().size(11.0));
                        ui.label(RichText::new(stats.session_count.to_string()).size(11.0));
                        ui.end_row();

                        for (label, value) in formatted.rows() {
                            ui.label(RichText::new(label).strong().size(11.0));
                            ui.label(RichText::new(value).size(11.0));
                            ui.end_row();
                        }
                    });
            });
    }
}
