//! Report module - static HTML report

mod builder;
mod format;
mod template;

pub use builder::{ReportBuilder, ReportConfig, ReportError, REPORT_FILE_NAME};
pub use format::FormattedStats;
pub use template::HtmlTemplate;
