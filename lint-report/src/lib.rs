//! ESLint report handling for pull request gates.
//!
//! [`filter::ReportFilter`] drops every diagnostic that is not on a line the
//! pull request added, [`analyze`] summarizes what is left and [`combine`]
//! labels the result as covering changed files only.

pub mod analyze;
pub mod combine;
pub mod errors;
pub mod filter;
pub mod types;

use std::path::Path;

use changed_lines::ChangedLineIndex;
use tracing::info;

pub use crate::analyze::{AnalyzedReport, ReportAnalyzer, SeverityAnalyzer};
pub use crate::errors::{LintReportError, LintReportResult};
pub use crate::filter::ReportFilter;
pub use crate::types::{DiagnosticMessage, DiagnosticReport, FileDiagnostics};

/// Parses ESLint `--format json` output.
pub fn parse_report(json: &str) -> LintReportResult<DiagnosticReport> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses an ESLint JSON report from disk.
pub fn load_report(path: &Path) -> LintReportResult<DiagnosticReport> {
    let raw = std::fs::read_to_string(path).map_err(|source| LintReportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_report(&raw)
}

/// Filters `report` to changed lines, analyzes it and wraps the result.
pub fn analyze_changed_lines<A: ReportAnalyzer>(
    report: &[FileDiagnostics],
    index: &ChangedLineIndex,
    workspace_root: &str,
    analyzer: &A,
) -> AnalyzedReport {
    let filtered = ReportFilter::new(index, workspace_root).apply(report);
    info!(
        files_in = report.len(),
        files_out = filtered.len(),
        "lint report filtered to changed lines"
    );

    combine::wrap_changed_files(analyzer.analyze(&filtered))
}
