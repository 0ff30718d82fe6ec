//! The single live report of an interactive session.
//!
//! Rendering collaborators get the current report and chart from here
//! instead of from ambient globals. A new run replaces both in one step;
//! a failed run hides the report view and keeps one message.

use crate::chart::ChartSpec;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::export::ExportControl;
use crate::loader::load_csv;
use crate::report::build_report;
use crate::types::Report;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct ReportSession {
    report: Option<Report>,
    chart: Option<ChartSpec>,
    visible: bool,
    message: Option<String>,
    pub export_control: ExportControl,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn chart(&self) -> Option<&ChartSpec> {
        self.chart.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Swap in a freshly built report and its chart. The previous chart is
    /// dropped before the new one is installed.
    pub fn replace(&mut self, report: Report, chart: ChartSpec) -> &Report {
        self.chart.take();
        self.chart = Some(chart);
        self.visible = true;
        self.message = None;
        self.report.insert(report)
    }

    /// Hide the report view and show `message`, replacing any earlier one.
    /// The last good report stays in place but is not shown.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.visible = false;
        self.message = Some(message.into());
    }

    /// Load `path`, build the report and install it. On failure the error is
    /// recorded as the session message and returned.
    pub fn run(&mut self, path: &Path, config: &ReportConfig) -> Result<&Report> {
        let built = load_csv(path).and_then(|table| build_report(&table, &config.required_columns));
        match built {
            Ok(report) => {
                let chart = ChartSpec::from_series(&report.series, config.clicks_scale);
                info!(path = %path.display(), "Report ready");
                Ok(self.replace(report, chart))
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Report run failed");
                self.fail(e.to_string());
                Err(e)
            }
        }
    }
}
