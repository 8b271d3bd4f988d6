//! Pull request lint gate: report only diagnostics on lines the PR added.
//!
//! 1) list the PR's files on GitHub and index their added lines
//! 2) load the ESLint JSON report
//! 3) filter, analyze and label the result as changed-files only

pub mod config;

use changed_lines::{ChangedLinesError, fetch_changed_lines};
use lint_report::{AnalyzedReport, LintReportError, ReportAnalyzer, analyze_changed_lines, load_report};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::GateConfig;

/// Failure of a gate run.
#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    ChangedLines(#[from] ChangedLinesError),

    #[error(transparent)]
    Report(#[from] LintReportError),
}

/// Runs the whole gate for one pull request.
///
/// The report is read before any network call so a missing report fails
/// fast without spending API quota.
pub async fn run<A: ReportAnalyzer>(
    cfg: &GateConfig,
    analyzer: &A,
) -> Result<AnalyzedReport, GateError> {
    let report = load_report(&cfg.report_path)?;
    debug!(
        path = %cfg.report_path.display(),
        files = report.len(),
        "lint report loaded"
    );

    let index = fetch_changed_lines(cfg.provider.clone(), &cfg.pull_request).await?;

    let analyzed = analyze_changed_lines(&report, &index, &cfg.workspace_root, analyzer);
    info!(
        errors = analyzed.error_count,
        warnings = analyzed.warning_count,
        success = analyzed.success,
        "gate finished"
    );

    Ok(analyzed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use changed_lines::{ProviderConfig, PullRequestRef};
    use lint_report::SeverityAnalyzer;

    #[tokio::test]
    async fn missing_report_fails_before_any_request() {
        let cfg = GateConfig {
            provider: ProviderConfig {
                // Unroutable: reaching the network would surface a provider error instead.
                base_api: "http://127.0.0.1:9".into(),
                token: "t".into(),
            },
            pull_request: PullRequestRef::from_slug("octo/web", 1).unwrap(),
            workspace_root: String::new(),
            report_path: "/definitely/not/here.json".into(),
        };

        let err = run(&cfg, &SeverityAnalyzer).await.unwrap_err();
        assert!(matches!(err, GateError::Report(LintReportError::Io { .. })));
    }
}
