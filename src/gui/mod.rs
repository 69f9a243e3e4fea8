//! GUI module - Interactive dashboard

mod app;
mod chart_viewer;
mod control_panel;

pub use app::{DashboardApp, DashboardConfig, DashboardError};
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
