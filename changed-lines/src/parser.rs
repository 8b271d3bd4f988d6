//! Hunk-level parsing of a single file's unified diff.
//!
//! Input is the per-file `patch` text a host returns for a pull request: one
//! or more `@@ -a[,b] +c[,d] @@` hunks with no `diff --git` / `---` / `+++`
//! envelope. Only the destination side matters here, so removed lines and
//! `\ No newline at end of file` markers are dropped while parsing.

use tracing::trace;

use crate::errors::DiffParseError;

/// Sentinel that opens a hunk header line.
const HUNK_HEADER: &str = "@@ -";

/// Marker git emits after a line lacking a trailing newline.
const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

/// A surviving hunk body line. Removed lines never make it this far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLine {
    /// `+` line, content without the marker.
    Added(String),
    /// Any other line: occupies a destination line number but is unchanged.
    Context(String),
}

impl RawLine {
    pub fn is_added(&self) -> bool {
        matches!(self, RawLine::Added(_))
    }
}

/// A diff hunk reduced to its destination side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// Trimmed destination range as written in the header, e.g. `10,3`.
    pub range: String,
    /// 1-based first destination line.
    pub new_start: u32,
    /// Destination line count; `None` when the header omitted it (single line).
    pub new_lines: Option<u32>,
    /// Body lines in patch order.
    pub lines: Vec<RawLine>,
}

/// Parses a patch into destination-side hunks.
///
/// Blank lines are skipped, `-` lines and the no-newline marker are dropped,
/// and a hunk that never accumulated a body line is not emitted. Lines before
/// the first header have no hunk to belong to and are ignored.
///
/// # Errors
/// [`DiffParseError::InvalidHunkHeader`] when a header has no `+<range> @@`
/// part or its numbers do not parse.
pub fn parse_hunks(file: &str, patch: &str) -> Result<Vec<Hunk>, DiffParseError> {
    let mut hunks: Vec<Hunk> = Vec::new();
    let mut current: Option<Hunk> = None;

    for line in patch.lines().filter(|l| !l.is_empty()) {
        if line.starts_with(HUNK_HEADER) {
            if let Some(h) = current.take().filter(|h| !h.lines.is_empty()) {
                hunks.push(h);
            }

            let range = destination_range(line).ok_or_else(|| invalid_header(file, line))?;
            let (new_start, new_lines) =
                split_range(range).ok_or_else(|| invalid_header(file, line))?;
            trace!(file, range, "hunk header");

            current = Some(Hunk {
                range: range.to_string(),
                new_start,
                new_lines,
                lines: Vec::new(),
            });
        } else if line.starts_with('-') || line == NO_NEWLINE_MARKER {
            continue;
        } else if let Some(hunk) = current.as_mut() {
            let raw = match line.strip_prefix('+') {
                Some(rest) => RawLine::Added(rest.to_string()),
                None => RawLine::Context(line.strip_prefix(' ').unwrap_or(line).to_string()),
            };
            hunk.lines.push(raw);
        }
    }

    if let Some(h) = current.filter(|h| !h.lines.is_empty()) {
        hunks.push(h);
    }

    Ok(hunks)
}

/// Extracts the text between the `+` and the closing `@@` of a header line.
///
/// `"@@ -1,3 +10,4 @@ fn main() {"` yields `"10,4"`.
fn destination_range(header: &str) -> Option<&str> {
    let rest = header.strip_prefix(HUNK_HEADER)?;
    let (_, after_plus) = rest.split_once('+')?;
    let (range, _) = after_plus.split_once("@@")?;
    let range = range.trim();
    (!range.is_empty()).then_some(range)
}

/// Splits `"12,7"` or `"12"` into `(start, count)`.
fn split_range(range: &str) -> Option<(u32, Option<u32>)> {
    match range.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, Some(count.parse().ok()?))),
        None => Some((range.parse().ok()?, None)),
    }
}

fn invalid_header(file: &str, line: &str) -> DiffParseError {
    DiffParseError::InvalidHunkHeader {
        file: file.to_string(),
        header: line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn added(s: &str) -> RawLine {
        RawLine::Added(s.to_string())
    }

    fn ctx(s: &str) -> RawLine {
        RawLine::Context(s.to_string())
    }

    #[test]
    fn single_hunk_with_comma_range() {
        let hunks = parse_hunks("a.ts", "@@ -1,3 +10,3 @@\n+a\n b\n+c").unwrap();
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].range, "10,3");
        assert_eq!(hunks[0].new_start, 10);
        assert_eq!(hunks[0].new_lines, Some(3));
        assert_eq!(hunks[0].lines, vec![added("a"), ctx("b"), added("c")]);
    }

    #[test]
    fn single_line_range_without_comma() {
        let hunks = parse_hunks("a.ts", "@@ -5 +8 @@\n+x").unwrap();
        assert_eq!(hunks[0].new_start, 8);
        assert_eq!(hunks[0].new_lines, None);
    }

    #[test]
    fn header_trailing_text_is_ignored() {
        let hunks = parse_hunks("a.rs", "@@ -3,2 +4,3 @@ fn main() {\n x\n+y\n z").unwrap();
        assert_eq!(hunks[0].range, "4,3");
        assert_eq!(hunks[0].lines.len(), 3);
    }

    #[test]
    fn trailing_text_with_plus_does_not_confuse_range() {
        let hunks = parse_hunks("a.c", "@@ -3,2 +4,3 @@ int a = b + c;\n+y").unwrap();
        assert_eq!(hunks[0].range, "4,3");
    }

    #[test]
    fn removed_lines_and_marker_are_dropped() {
        let patch = "@@ -1,3 +1,2 @@\n keep\n-gone\n-also gone\n+new\n\\ No newline at end of file";
        let hunks = parse_hunks("a.ts", patch).unwrap();
        assert_eq!(hunks[0].lines, vec![ctx("keep"), added("new")]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let hunks = parse_hunks("a.ts", "@@ -1 +1,2 @@\n\n+a\n\n+b\n").unwrap();
        assert_eq!(hunks[0].lines, vec![added("a"), added("b")]);
    }

    #[test]
    fn multiple_hunks_keep_order() {
        let patch = "@@ -1,2 +1,3 @@\n a\n+b\n c\n@@ -20,2 +21,2 @@\n-x\n+y\n z";
        let hunks = parse_hunks("a.ts", patch).unwrap();
        assert_eq!(hunks.len(), 2);
        assert_eq!(hunks[0].new_start, 1);
        assert_eq!(hunks[1].new_start, 21);
        assert_eq!(hunks[1].lines, vec![added("y"), ctx("z")]);
    }

    #[test]
    fn removal_only_patch_yields_no_hunks() {
        let hunks = parse_hunks("gone.ts", "@@ -1,2 +0,0 @@\n-a\n-b").unwrap();
        assert!(hunks.is_empty());
    }

    #[test]
    fn bodyless_hunk_is_not_emitted() {
        let patch = "@@ -1,1 +0,0 @@\n-a\n@@ -9,1 +8,1 @@\n+b";
        let hunks = parse_hunks("a.ts", patch).unwrap();
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].new_start, 8);
    }

    #[test]
    fn prelude_before_first_header_is_ignored() {
        let hunks = parse_hunks("a.ts", "stray\n@@ -1 +1 @@\n+a").unwrap();
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].lines, vec![added("a")]);
    }

    #[test]
    fn malformed_headers_are_errors() {
        for bad in [
            "@@ -1 +x @@\n+a",
            "@@ -1 @@\n+a",
            "@@ -1 +2,y @@\n+a",
            "@@ -1 +2\n+a",
            "@@ -1 + @@\n+a",
        ] {
            let err = parse_hunks("bad.ts", bad).unwrap_err();
            assert!(
                matches!(err, DiffParseError::InvalidHunkHeader { ref file, .. } if file == "bad.ts"),
                "expected header error for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn crlf_line_endings() {
        let hunks = parse_hunks("a.ts", "@@ -1 +1,2 @@\r\n a\r\n+b\r\n").unwrap();
        assert_eq!(hunks[0].lines, vec![ctx("a"), added("b")]);
    }
}
