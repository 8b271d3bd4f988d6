//! Error type for loading lint reports.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type LintReportResult<T> = Result<T, LintReportError>;

/// Root error type for the lint-report crate.
#[derive(Debug, Error)]
pub enum LintReportError {
    /// The report file could not be read.
    #[error("failed to read lint report {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The report was not valid ESLint JSON output.
    #[error("invalid lint report: {0}")]
    Serde(#[from] serde_json::Error),
}
