//! Static Chart Renderer
//! Draws the report charts as inline SVG with plotters.
//!
//! Charts:
//! 1. Heart Rate Over Time: line of avg BPM by date
//! 2. Correlation heatmap: Pearson r between the four metrics
//! 3. Heart Rate vs Speed / vs Power Output: scatter + red OLS trendline
//! 4. Weekly Heart Rate Trend: line of per-week mean BPM
//! 5. Power Efficiency: MPH per 100 W by date
//! 6. Heart rate / power zones: session count per zone

use chrono::NaiveDate;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::fmt::Display;
use std::ops::Range;
use thiserror::Error;

use crate::stats::{
    CorrelationMatrix, EfficiencyPoint, HeartRatePoint, ReportData, ScatterSeries, WeeklyAggregate,
    ZoneCounts,
};

const CHART_SIZE: (u32, u32) = (768, 432);
const HEATMAP_SIZE: (u32, u32) = (560, 480);
const FONT: &str = "sans-serif";

const LINE_COLOR: RGBColor = RGBColor(99, 110, 250);
const POINT_COLOR: RGBColor = RGBColor(99, 110, 250);
const TREND_COLOR: RGBColor = RED;
const UNDEFINED_CELL: RGBColor = RGBColor(200, 200, 200);
const EFFICIENCY_COLOR: RGBColor = RGBColor(0, 204, 150);
const ZONE_COLOR: RGBColor = RGBColor(239, 85, 59);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart '{chart}': {message}")]
    Plot { chart: &'static str, message: String },
}

fn plot_err<E: Display>(chart: &'static str) -> impl Fn(E) -> RenderError {
    move |e| RenderError::Plot {
        chart,
        message: e.to_string(),
    }
}

/// SVG fragments of every report chart.
#[derive(Debug, Clone, Default)]
pub struct ReportCharts {
    pub heart_rate_plot: String,
    pub correlation_plot: String,
    pub speed_hr_plot: String,
    pub power_hr_plot: String,
    pub weekly_trend_plot: String,
    pub efficiency_plot: String,
    pub heart_rate_zones_plot: String,
    pub power_zones_plot: String,
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render every chart of the static report.
    pub fn render_all(data: &ReportData) -> Result<ReportCharts, RenderError> {
        Ok(ReportCharts {
            heart_rate_plot: Self::heart_rate_over_time(&data.heart_rate_trend)?,
            correlation_plot: Self::correlation_heatmap(&data.correlation)?,
            speed_hr_plot: Self::scatter_with_trend(&data.speed_vs_heart_rate, "Heart Rate vs Speed")?,
            power_hr_plot: Self::scatter_with_trend(
                &data.power_vs_heart_rate,
                "Heart Rate vs Power Output",
            )?,
            weekly_trend_plot: Self::weekly_trend(&data.weekly)?,
            efficiency_plot: Self::efficiency_over_time(&data.efficiency)?,
            heart_rate_zones_plot: Self::zone_bars(&data.heart_rate_zones, "Heart Rate Zones")?,
            power_zones_plot: Self::zone_bars(&data.power_zones, "Power Zones")?,
        })
    }

    pub fn heart_rate_over_time(points: &[HeartRatePoint]) -> Result<String, RenderError> {
        const TITLE: &str = "Heart Rate Over Time";
        let err = plot_err(TITLE);

        let series: Vec<(f64, f64)> = points
            .iter()
            .map(|p| (day_number(p.date), p.avg_heart_rate))
            .collect();

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
            root.fill(&WHITE).map_err(&err)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(TITLE, (FONT, 20))
                .margin(10)
                .set_label_area_size(LabelAreaPosition::Left, 50)
                .set_label_area_size(LabelAreaPosition::Bottom, 40)
                .build_cartesian_2d(
                    padded_range(series.iter().map(|p| p.0)),
                    padded_range(series.iter().map(|p| p.1)),
                )
                .map_err(&err)?;

            chart
                .configure_mesh()
                .x_desc("Date")
                .y_desc("Avg BPM")
                .x_labels(8)
                .x_label_formatter(&|x| day_label(*x))
                .draw()
                .map_err(&err)?;

            chart
                .draw_series(LineSeries::new(series.iter().copied(), LINE_COLOR.stroke_width(2)))
                .map_err(&err)?;

            root.present().map_err(&err)?;
        }

        Ok(svg)
    }

    /// Grid of coloured cells, +1 red through 0 white to -1 blue. Undefined cells are grey.
    pub fn correlation_heatmap(matrix: &CorrelationMatrix) -> Result<String, RenderError> {
        const TITLE: &str = "Metric Correlations";
        let err = plot_err(TITLE);

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, HEATMAP_SIZE).into_drawing_area();
            root.fill(&WHITE).map_err(&err)?;
            let root = root.titled(TITLE, (FONT, 20)).map_err(&err)?;

            let (width, height) = root.dim_in_pixel();
            let left = 90i32;
            let top = 10i32;
            let n = matrix.metrics.len() as i32;
            let cell_w = (width as i32 - left - 10) / n;
            let cell_h = (height as i32 - top - 40) / n;

            let centered = FontDesc::new(FontFamily::SansSerif, 14.0, FontStyle::Normal)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));
            let row_label = FontDesc::new(FontFamily::SansSerif, 13.0, FontStyle::Normal)
                .color(&BLACK)
                .pos(Pos::new(HPos::Right, VPos::Center));

            for (i, row_metric) in matrix.metrics.iter().enumerate() {
                let y0 = top + i as i32 * cell_h;

                root.draw(&Text::new(
                    row_metric.label(),
                    (left - 6, y0 + cell_h / 2),
                    row_label.clone(),
                ))
                .map_err(&err)?;

                for j in 0..matrix.metrics.len() {
                    let x0 = left + j as i32 * cell_w;
                    let value = matrix.values[i][j];
                    let fill = value.map(heat_color).unwrap_or(UNDEFINED_CELL);

                    root.draw(&Rectangle::new(
                        [(x0, y0), (x0 + cell_w, y0 + cell_h)],
                        fill.filled(),
                    ))
                    .map_err(&err)?;
                    root.draw(&Rectangle::new(
                        [(x0, y0), (x0 + cell_w, y0 + cell_h)],
                        WHITE.stroke_width(2),
                    ))
                    .map_err(&err)?;

                    let text = value
                        .map(|v| format!("{:.2}", v))
                        .unwrap_or_else(|| "n/a".to_string());
                    root.draw(&Text::new(
                        text,
                        (x0 + cell_w / 2, y0 + cell_h / 2),
                        centered.clone(),
                    ))
                    .map_err(&err)?;
                }
            }

            for (j, metric) in matrix.metrics.iter().enumerate() {
                let x = left + j as i32 * cell_w + cell_w / 2;
                root.draw(&Text::new(
                    metric.label(),
                    (x, top + n * cell_h + 18),
                    centered.clone(),
                ))
                .map_err(&err)?;
            }

            root.present().map_err(&err)?;
        }

        Ok(svg)
    }

    pub fn scatter_with_trend(series: &ScatterSeries, title: &'static str) -> Result<String, RenderError> {
        let err = plot_err(title);

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
            root.fill(&WHITE).map_err(&err)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(title, (FONT, 20))
                .margin(10)
                .set_label_area_size(LabelAreaPosition::Left, 50)
                .set_label_area_size(LabelAreaPosition::Bottom, 40)
                .build_cartesian_2d(
                    padded_range(series.points.iter().map(|p| p.0)),
                    padded_range(series.points.iter().map(|p| p.1)),
                )
                .map_err(&err)?;

            chart
                .configure_mesh()
                .x_desc(series.metric.field().header())
                .y_desc("Avg BPM")
                .draw()
                .map_err(&err)?;

            chart
                .draw_series(
                    series
                        .points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 3, POINT_COLOR.filled())),
                )
                .map_err(&err)?;

            if let Some(segment) = series.trend.and_then(|t| t.segment(&series.points)) {
                chart
                    .draw_series(LineSeries::new(segment, TREND_COLOR.stroke_width(2)))
                    .map_err(&err)?;
            }

            root.present().map_err(&err)?;
        }

        Ok(svg)
    }

    pub fn weekly_trend(weekly: &[WeeklyAggregate]) -> Result<String, RenderError> {
        const TITLE: &str = "Weekly Heart Rate Trend";
        let err = plot_err(TITLE);

        let labels: Vec<&str> = weekly.iter().map(|w| w.week.as_str()).collect();
        let series: Vec<(f64, f64)> = weekly
            .iter()
            .enumerate()
            .map(|(i, w)| (i as f64, w.mean_heart_rate))
            .collect();

        let week_label = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).map(|s| s.to_string()).unwrap_or_default()
        };

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
            root.fill(&WHITE).map_err(&err)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(TITLE, (FONT, 20))
                .margin(10)
                .set_label_area_size(LabelAreaPosition::Left, 50)
                .set_label_area_size(LabelAreaPosition::Bottom, 40)
                .build_cartesian_2d(
                    padded_range(series.iter().map(|p| p.0)),
                    padded_range(series.iter().map(|p| p.1)),
                )
                .map_err(&err)?;

            chart
                .configure_mesh()
                .x_desc("Week")
                .y_desc("Avg BPM")
                .x_labels(labels.len().clamp(2, 12))
                .x_label_formatter(&week_label)
                .draw()
                .map_err(&err)?;

            chart
                .draw_series(LineSeries::new(series.iter().copied(), LINE_COLOR.stroke_width(2)))
                .map_err(&err)?;
            chart
                .draw_series(series.iter().map(|&p| Circle::new(p, 4, LINE_COLOR.filled())))
                .map_err(&err)?;

            root.present().map_err(&err)?;
        }

        Ok(svg)
    }
    pub fn efficiency_over_time(points: &[EfficiencyPoint]) -> Result<String, RenderError> {
        const TITLE: &str = "Power Efficiency";
        let err = plot_err(TITLE);

        let series: Vec<(f64, f64)> = points
            .iter()
            .map(|p| (day_number(p.date), p.efficiency))
            .collect();

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
            root.fill(&WHITE).map_err(&err)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(TITLE, (FONT, 20))
                .margin(10)
                .set_label_area_size(LabelAreaPosition::Left, 50)
                .set_label_area_size(LabelAreaPosition::Bottom, 40)
                .build_cartesian_2d(
                    padded_range(series.iter().map(|p| p.0)),
                    padded_range(series.iter().map(|p| p.1)),
                )
                .map_err(&err)?;

            chart
                .configure_mesh()
                .x_desc("Date")
                .y_desc("MPH per 100 W")
                .x_labels(8)
                .x_label_formatter(&|x| day_label(*x))
                .draw()
                .map_err(&err)?;

            chart
                .draw_series(LineSeries::new(series.iter().copied(), EFFICIENCY_COLOR.stroke_width(2)))
                .map_err(&err)?;
            chart
                .draw_series(series.iter().map(|&p| Circle::new(p, 3, EFFICIENCY_COLOR.filled())))
                .map_err(&err)?;

            root.present().map_err(&err)?;
        }

        Ok(svg)
    }

    /// One bar per zone, labelled with the zone's bound.
    pub fn zone_bars(zones: &ZoneCounts, title: &'static str) -> Result<String, RenderError> {
        let err = plot_err(title);

        let labels = zones.labels();
        let top = zones.counts.iter().copied().max().unwrap_or(0).max(1) as f64;
        let zone_label = |x: &f64| {
            let idx = (x - 0.5).round();
            if (x - 0.5 - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        };

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
            root.fill(&WHITE).map_err(&err)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(title, (FONT, 20))
                .margin(10)
                .set_label_area_size(LabelAreaPosition::Left, 50)
                .set_label_area_size(LabelAreaPosition::Bottom, 40)
                .build_cartesian_2d(0.0..labels.len() as f64, 0.0..top * 1.1)
                .map_err(&err)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .y_desc("Sessions")
                .x_labels(labels.len() * 2 + 1)
                .x_label_formatter(&zone_label)
                .draw()
                .map_err(&err)?;

            chart
                .draw_series(zones.counts.iter().enumerate().map(|(i, &count)| {
                    let x = i as f64;
                    Rectangle::new([(x + 0.1, 0.0), (x + 0.9, count as f64)], ZONE_COLOR.filled())
                }))
                .map_err(&err)?;

            root.present().map_err(&err)?;
        }

        Ok(svg)
    }
}

/// Days since the Common Era, used as a continuous date axis.
pub fn day_number(date: NaiveDate) -> f64 {
    use chrono::Datelike;
    date.num_days_from_ce() as f64
}

/// Inverse of [`day_number`] formatted as `YYYY-MM-DD`.
pub fn day_label(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Min..max of the values with 5% padding; never empty or degenerate.
pub fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !lo.is_finite() {
        return 0.0..1.0;
    }
    if hi - lo < f64::EPSILON {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

fn heat_color(r: f64) -> RGBColor {
    let c = colorous::RED_BLUE.eval_continuous(((1.0 - r) / 2.0).clamp(0.0, 1.0));
    RGBColor(c.r, c.g, c.b)
}
