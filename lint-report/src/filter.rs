//! Reduction of a lint report to the lines a pull request added.

use changed_lines::ChangedLineIndex;
use tracing::debug;

use crate::types::{DiagnosticReport, FileDiagnostics};

/// Keeps only diagnostics on added lines of files present in the index.
///
/// Linters report paths as they saw them on disk, while the index is keyed
/// by repository-relative paths, so `workspace_root` is stripped first.
#[derive(Debug, Clone, Copy)]
pub struct ReportFilter<'a> {
    index: &'a ChangedLineIndex,
    workspace_root: &'a str,
}

impl<'a> ReportFilter<'a> {
    /// `workspace_root` may be empty, which disables path stripping.
    pub fn new(index: &'a ChangedLineIndex, workspace_root: &'a str) -> Self {
        Self {
            index,
            workspace_root,
        }
    }

    /// Returns a new report; the input is left untouched.
    ///
    /// File and message order are preserved. Files absent from the index are
    /// dropped entirely, files present keep only matching messages (possibly
    /// none). Output file paths are the normalized, repository-relative ones.
    pub fn apply(&self, report: &[FileDiagnostics]) -> DiagnosticReport {
        let mut out = Vec::new();

        for file in report {
            let path = normalize_path(&file.file_path, self.workspace_root);
            let Some(lines) = self.index.lines(path) else {
                continue;
            };

            let messages: Vec<_> = file
                .messages
                .iter()
                .filter(|m| m.line.is_some_and(|l| lines.contains(&l)))
                .cloned()
                .collect();

            debug!(
                file = path,
                kept = messages.len(),
                total = file.messages.len(),
                "filtered diagnostics"
            );

            out.push(FileDiagnostics {
                file_path: path.to_string(),
                messages,
                extra: file.extra.clone(),
            });
        }

        out
    }
}

/// Strips `workspace_root` and the separator right after it from `path`.
///
/// Paths outside the workspace, and the root itself, come back unchanged.
pub fn normalize_path<'p>(path: &'p str, workspace_root: &str) -> &'p str {
    let root = workspace_root.trim_end_matches(['/', '\\']);
    if root.is_empty() {
        return path;
    }

    path.strip_prefix(root)
        .and_then(|rest| rest.strip_prefix(['/', '\\']))
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn index(entries: &[(&str, &[u32])]) -> ChangedLineIndex {
        entries
            .iter()
            .map(|(f, lines)| (f.to_string(), lines.iter().copied().collect::<HashSet<_>>()))
            .collect()
    }

    fn report(value: serde_json::Value) -> DiagnosticReport {
        serde_json::from_value(value).unwrap()
    }

    fn lines_of(file: &FileDiagnostics) -> Vec<Option<u32>> {
        file.messages.iter().map(|m| m.line).collect()
    }

    #[test]
    fn keeps_only_changed_lines() {
        let idx = index(&[("a.ts", &[2, 3])]);
        let input = report(json!([
            {"filePath": "a.ts", "messages": [{"line": 2}, {"line": 9}]}
        ]));

        let out = ReportFilter::new(&idx, "").apply(&input);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].file_path, "a.ts");
        assert_eq!(lines_of(&out[0]), vec![Some(2)]);
    }

    #[test]
    fn files_absent_from_index_are_dropped() {
        let idx = index(&[("a.ts", &[1])]);
        let input = report(json!([
            {"filePath": "b.ts", "messages": [{"line": 1}]},
            {"filePath": "a.ts", "messages": [{"line": 5}]}
        ]));

        let out = ReportFilter::new(&idx, "").apply(&input);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].file_path, "a.ts");
        assert!(out[0].messages.is_empty());
    }

    #[test]
    fn workspace_prefix_is_stripped() {
        let idx = index(&[("src/a.ts", &[4])]);
        let input = report(json!([
            {"filePath": "/home/runner/work/app/app/src/a.ts", "messages": [{"line": 4}]}
        ]));

        for root in ["/home/runner/work/app/app", "/home/runner/work/app/app/"] {
            let out = ReportFilter::new(&idx, root).apply(&input);
            assert_eq!(out[0].file_path, "src/a.ts");
            assert_eq!(lines_of(&out[0]), vec![Some(4)]);
        }
        // input untouched
        assert_eq!(input[0].file_path, "/home/runner/work/app/app/src/a.ts");
    }

    #[test]
    fn normalize_edge_cases() {
        assert_eq!(normalize_path("/ws/a.ts", "/ws"), "a.ts");
        assert_eq!(normalize_path("/ws2/a.ts", "/ws"), "/ws2/a.ts");
        assert_eq!(normalize_path("/other/a.ts", "/ws"), "/other/a.ts");
        assert_eq!(normalize_path("/ws", "/ws"), "/ws");
        assert_eq!(normalize_path("a.ts", ""), "a.ts");
        assert_eq!(normalize_path(r"C:\ws\src\a.ts", r"C:\ws"), r"src\a.ts");
    }

    #[test]
    fn order_is_preserved() {
        let idx = index(&[("a.ts", &[1, 2, 3]), ("b.ts", &[7])]);
        let input = report(json!([
            {"filePath": "b.ts", "messages": [{"line": 7}]},
            {"filePath": "a.ts", "messages": [{"line": 3}, {"line": 1}, {"line": 2}]}
        ]));

        let out = ReportFilter::new(&idx, "").apply(&input);
        let paths: Vec<_> = out.iter().map(|f| f.file_path.as_str()).collect();
        assert_eq!(paths, vec!["b.ts", "a.ts"]);
        assert_eq!(lines_of(&out[1]), vec![Some(3), Some(1), Some(2)]);
    }

    #[test]
    fn messages_without_line_never_match() {
        let idx = index(&[("a.ts", &[1])]);
        let input = report(json!([
            {"filePath": "a.ts", "messages": [{"message": "fatal"}, {"line": 1}]}
        ]));

        let out = ReportFilter::new(&idx, "").apply(&input);
        assert_eq!(lines_of(&out[0]), vec![Some(1)]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let idx = index(&[("src/a.ts", &[1, 5]), ("src/b.ts", &[2])]);
        let input = report(json!([
            {"filePath": "/ws/src/a.ts", "messages": [{"line": 1}, {"line": 2}, {"line": 5}]},
            {"filePath": "/ws/src/b.ts", "messages": [{"line": 3}]},
            {"filePath": "/ws/src/c.ts", "messages": [{"line": 1}]}
        ]));

        let filter = ReportFilter::new(&idx, "/ws");
        let once = filter.apply(&input);
        let twice = filter.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn output_is_subset_of_input() {
        let idx = index(&[("a.ts", &[1, 2]), ("b.ts", &[10])]);
        let input = report(json!([
            {"filePath": "a.ts", "messages": [{"line": 1}, {"line": 3}, {"line": 2}, {"line": 2}]},
            {"filePath": "b.ts", "messages": [{"line": 9}, {"line": 10}]},
            {"filePath": "c.ts", "messages": [{"line": 1}]}
        ]));

        let out = ReportFilter::new(&idx, "").apply(&input);
        for file in &out {
            let original = input.iter().find(|f| f.file_path == file.file_path).unwrap();
            for m in &file.messages {
                assert!(original.messages.contains(m));
                assert!(idx.contains(&file.file_path, m.line.unwrap()));
            }
        }
        assert_eq!(lines_of(&out[0]), vec![Some(1), Some(2), Some(2)]);
        assert_eq!(lines_of(&out[1]), vec![Some(10)]);
    }
}
