//! Static report pipeline: load, clean, aggregate, render, write.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::format::FormattedStats;
use super::template::HtmlTemplate;
use crate::charts::{RenderError, ReportCharts, StaticChartRenderer};
use crate::data::{DataLoadError, Dataset};
use crate::stats::{ReportData, StatsError};

pub const REPORT_FILE_NAME: &str = "index.html";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Load(#[from] DataLoadError),
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Failed to read template {path:?}: {source}")]
    Template { path: PathBuf, source: io::Error },
    #[error("Failed to write report to {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Settings of one `report` run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Template file; the bundled `index.html` when `None`.
    pub template: Option<PathBuf>,
    /// Open the written report with the system default app.
    pub open: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(crate::DEFAULT_INPUT),
            output_dir: PathBuf::from("build"),
            template: None,
            open: false,
        }
    }
}

pub struct ReportBuilder;

impl ReportBuilder {
    /// Run the whole pipeline and return the path of the written HTML file.
    pub fn build(config: &ReportConfig) -> Result<PathBuf, ReportError> {
        let template = Self::load_template(config)?;
        let dataset = Dataset::load(&config.input)?;
        let html = Self::render(&dataset, &template)?;

        std::fs::create_dir_all(&config.output_dir).map_err(|source| ReportError::Write {
            path: config.output_dir.clone(),
            source,
        })?;
        let path = config.output_dir.join(REPORT_FILE_NAME);
        std::fs::write(&path, html).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("Report written to {:?}", path);

        if config.open {
            if let Err(e) = open::that(&path) {
                log::warn!("Could not open {:?}: {}", path, e);
            }
        }

        Ok(path)
    }

    fn load_template(config: &ReportConfig) -> Result<HtmlTemplate, ReportError> {
        match &config.template {
            Some(path) => HtmlTemplate::from_file(path).map_err(|source| ReportError::Template {
                path: path.clone(),
                source,
            }),
            None => Ok(HtmlTemplate::builtin()),
        }
    }

    /// Compute, chart and fill the template for an already-loaded dataset.
    pub fn render(dataset: &Dataset, template: &HtmlTemplate) -> Result<String, ReportError> {
        let data = ReportData::build(dataset)?;
        let charts = StaticChartRenderer::render_all(&data)?;
        let stats = FormattedStats::from(&data.summary);
        Ok(template.render(&Self::template_vars(dataset, &stats, &charts)))
    }

    /// Values available to the template.
    pub fn template_vars(
        dataset: &Dataset,
        stats: &FormattedStats,
        charts: &ReportCharts,
    ) -> HashMap<String, String> {
        let mut vars: HashMap<String, String> = stats
            .entries()
            .iter()
            .map(|(key, value)| (format!("stats.{}", key), value.to_string()))
            .collect();

        vars.insert("session_count".into(), dataset.len().to_string());
        vars.insert("dropped_rows".into(), dataset.dropped_row_count().to_string());
        vars.insert("heart_rate_plot".into(), charts.heart_rate_plot.clone());
        vars.insert("correlation_plot".into(), charts.correlation_plot.clone());
        vars.insert("speed_hr_plot".into(), charts.speed_hr_plot.clone());
        vars.insert("power_hr_plot".into(), charts.power_hr_plot.clone());
        vars.insert("weekly_trend_plot".into(), charts.weekly_trend_plot.clone());
        vars.insert("efficiency_plot".into(), charts.efficiency_plot.clone());
        vars.insert("heart_rate_zones_plot".into(), charts.heart_rate_zones_plot.clone());
        vars.insert("power_zones_plot".into(), charts.power_zones_plot.clone());
        vars
    }
}
