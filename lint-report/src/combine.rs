//! Fixed wrapper that labels an analysis as covering changed lines only.

use crate::analyze::AnalyzedReport;

/// Heading placed above the analyzer's markdown.
pub const CHANGED_LINES_HEADING: &str = "# Pull Request Changed Lines ESLint Results:";

/// Wraps summary and markdown in the changed-files template.
///
/// Counts, success flag and annotations pass through unchanged.
pub fn wrap_changed_files(analyzed: AnalyzedReport) -> AnalyzedReport {
    let summary = format!("\n{} in pull request changed files.\n", analyzed.summary);
    let markdown = format!(
        "\n{}\n**{}**\n{}\n",
        CHANGED_LINES_HEADING, analyzed.summary, analyzed.markdown
    );

    AnalyzedReport {
        summary,
        markdown,
        ..analyzed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{Annotation, AnnotationLevel};

    #[test]
    fn template_and_passthrough() {
        let annotation = Annotation {
            path: "a.ts".into(),
            start_line: 2,
            end_line: 2,
            start_column: None,
            end_column: None,
            annotation_level: AnnotationLevel::Warning,
            message: "m".into(),
            title: None,
        };
        let inner = AnalyzedReport {
            error_count: 0,
            warning_count: 1,
            markdown: "TABLE".into(),
            success: true,
            summary: "0 errors and 1 warning".into(),
            annotations: vec![annotation.clone()],
        };

        let out = wrap_changed_files(inner);
        assert_eq!(
            out.summary,
            "\n0 errors and 1 warning in pull request changed files.\n"
        );
        assert_eq!(
            out.markdown,
            "\n# Pull Request Changed Lines ESLint Results:\n**0 errors and 1 warning**\nTABLE\n"
        );
        assert_eq!(out.error_count, 0);
        assert_eq!(out.warning_count, 1);
        assert!(out.success);
        assert_eq!(out.annotations, vec![annotation]);
    }
}
