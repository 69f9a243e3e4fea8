//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::{
    day_label, day_number, padded_range, RenderError, ReportCharts, StaticChartRenderer,
};
