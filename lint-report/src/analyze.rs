//! Turning a (filtered) report into counts, markdown and check annotations.

use serde::{Deserialize, Serialize};

use crate::types::{DiagnosticMessage, FileDiagnostics};

/// Result of analyzing a report, as consumed by a CI check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedReport {
    pub error_count: usize,
    pub warning_count: usize,
    pub markdown: String,
    pub success: bool,
    pub summary: String,
    pub annotations: Vec<Annotation>,
}

/// Annotation level accepted by the GitHub check-runs API.
///
/// Severity 1 maps to `warning` and severity 2 to `failure`; off messages
/// produce no annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationLevel {
    Warning,
    Failure,
}

/// One check-run annotation (GitHub field names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    /// Only allowed by GitHub when `start_line == end_line`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_column: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
    pub annotation_level: AnnotationLevel,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Seam for whatever produces the human-facing result from a report.
pub trait ReportAnalyzer {
    fn analyze(&self, report: &[FileDiagnostics]) -> AnalyzedReport;
}

/// Default analyzer: severity 2 counts as error, 1 as warning, 0 is ignored.
///
/// The run succeeds when no error remains.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeverityAnalyzer;

impl ReportAnalyzer for SeverityAnalyzer {
    fn analyze(&self, report: &[FileDiagnostics]) -> AnalyzedReport {
        let mut error_count = 0;
        let mut warning_count = 0;
        let mut annotations = Vec::new();
        let mut rows = Vec::new();

        for file in report {
            for msg in &file.messages {
                let level = if msg.is_error() {
                    error_count += 1;
                    AnnotationLevel::Failure
                } else if msg.is_warning() {
                    warning_count += 1;
                    AnnotationLevel::Warning
                } else {
                    continue;
                };

                rows.push(markdown_row(&file.file_path, msg));
                annotations.push(annotation(&file.file_path, msg, level));
            }
        }

        let summary = summary_line(error_count, warning_count);
        let markdown = if rows.is_empty() {
            "No ESLint problems found.\n".to_string()
        } else {
            let mut md = String::from(
                "| File | Line | Severity | Rule | Message |\n| --- | --- | --- | --- | --- |\n",
            );
            for row in rows {
                md.push_str(&row);
                md.push('\n');
            }
            md
        };

        AnalyzedReport {
            error_count,
            warning_count,
            markdown,
            success: error_count == 0,
            summary,
            annotations,
        }
    }
}

/// `"1 error and 3 warnings"`.
pub fn summary_line(errors: usize, warnings: usize) -> String {
    format!(
        "{} {} and {} {}",
        errors,
        plural(errors, "error"),
        warnings,
        plural(warnings, "warning")
    )
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

fn markdown_row(path: &str, msg: &DiagnosticMessage) -> String {
    let line = msg.line.map_or_else(|| "-".to_string(), |l| l.to_string());
    let severity = if msg.is_error() { "error" } else { "warning" };
    let rule = msg.rule_id.as_deref().unwrap_or("-");
    format!(
        "| `{}` | {} | {} | `{}` | {} |",
        path,
        line,
        severity,
        rule,
        escape_cell(&msg.message)
    )
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

fn annotation(path: &str, msg: &DiagnosticMessage, level: AnnotationLevel) -> Annotation {
    let start_line = msg.line.unwrap_or(1);
    let end_line = msg.end_line.unwrap_or(start_line).max(start_line);
    let (start_column, end_column) = if start_line == end_line {
        (msg.column, msg.end_column)
    } else {
        (None, None)
    };

    Annotation {
        path: path.to_string(),
        start_line,
        end_line,
        start_column,
        end_column,
        annotation_level: level,
        message: msg.message.clone(),
        title: msg.rule_id.clone(),
    }
}
