//! Cycling Dashboard - training log analysis
//!
//! Subcommands: build the static HTML report, open the interactive dashboard,
//! or print the summary statistics as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use cycling_dashboard::data::Dataset;
use cycling_dashboard::gui::{DashboardApp, DashboardConfig};
use cycling_dashboard::report::{ReportBuilder, ReportConfig};
use cycling_dashboard::stats::{
    efficiency_series, heart_rate_zones, power_zones, weekly_aggregate, CorrelationMatrix,
    EfficiencyPoint, StatsCalculator, SummaryStats, WeeklyAggregate, ZoneCounts,
};
use cycling_dashboard::DEFAULT_INPUT;

#[derive(Parser)]
#[command(name = "cycling_dashboard")]
#[command(about = "Summary statistics and charts from a cycling training log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static HTML report
    Report {
        /// Training log CSV
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,
        /// Directory the report is written to
        #[arg(short, long, default_value = "build")]
        output_dir: PathBuf,
        /// HTML template with {{ placeholder }} slots (bundled index.html if omitted)
        #[arg(short, long)]
        template: Option<PathBuf>,
        /// Open the report in the default browser when done
        #[arg(long)]
        open: bool,
    },
    /// Open the interactive dashboard window
    Dashboard {
        /// Training log CSV
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,
        /// Initial window width
        #[arg(long, default_value_t = 1400.0)]
        width: f32,
        /// Initial window height
        #[arg(long, default_value_t = 900.0)]
        height: f32,
    },
    /// Print summary statistics as JSON
    Stats {
        /// Training log CSV
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Serialize)]
struct StatsOutput {
    sessions: usize,
    dropped_rows: usize,
    summary: SummaryStats,
    correlation: CorrelationMatrix,
    weekly: Vec<WeeklyAggregate>,
    heart_rate_zones: ZoneCounts,
    power_zones: ZoneCounts,
    efficiency: Vec<EfficiencyPoint>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            input,
            output_dir,
            template,
            open,
        } => {
            let config = ReportConfig {
                input,
                output_dir,
                template,
                open,
            };
            let path = ReportBuilder::build(&config)
                .with_context(|| format!("building report from {:?}", config.input))?;
            println!("{}", path.display());
        }
        Commands::Dashboard {
            input,
            width,
            height,
        } => {
            let config = DashboardConfig {
                input,
                width,
                height,
            };
            DashboardApp::run(&config)
                .with_context(|| format!("running dashboard on {:?}", config.input))?;
        }
        Commands::Stats { input, pretty } => {
            let dataset = Dataset::load(&input)
                .with_context(|| format!("loading {:?}", input))?;
            let records = dataset.records();

            let output = StatsOutput {
                sessions: dataset.len(),
                dropped_rows: dataset.dropped_row_count(),
                summary: StatsCalculator::summarize(records)?,
                correlation: StatsCalculator::correlation_matrix(records)?,
                weekly: weekly_aggregate(records),
                heart_rate_zones: heart_rate_zones(records),
                power_zones: power_zones(records),
                efficiency: efficiency_series(records),
            };

            let json = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{}", json);
        }
    }

    Ok(())
}
