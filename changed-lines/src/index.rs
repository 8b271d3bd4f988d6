//! Per-file index of added line numbers for a whole patch set.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::errors::DiffParseError;
use crate::git_providers::PatchRecord;
use crate::parser::parse_hunks;
use crate::resolver::added_line_numbers;

/// File path → set of added line numbers.
///
/// Only files with at least one added line are stored, so a missing file
/// means "nothing reportable changed", never an error. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangedLineIndex {
    files: HashMap<String, HashSet<u32>>,
}

impl ChangedLineIndex {
    /// Builds the index from every record of a pull request.
    ///
    /// Records with zero additions or no patch text are skipped, as are files
    /// whose hunks resolve to no added line (deletions, content-less renames).
    ///
    /// # Errors
    /// Fails on the first record whose patch has a malformed hunk header; no
    /// partial index is returned.
    pub fn from_records(records: &[PatchRecord]) -> Result<Self, DiffParseError> {
        let mut files = HashMap::new();

        for record in records {
            let Some(patch) = record.reviewable_patch() else {
                debug!(
                    file = %record.filename,
                    additions = record.additions,
                    status = record.status.as_deref().unwrap_or("-"),
                    "skipping record without added lines"
                );
                continue;
            };

            let lines = file_added_lines(&record.filename, patch)?;
            if lines.is_empty() {
                debug!(
                    file = %record.filename,
                    previous = record.previous_filename.as_deref().unwrap_or("-"),
                    "no added lines survived parsing"
                );
                continue;
            }

            debug!(file = %record.filename, count = lines.len(), "indexed added lines");
            files
                .entry(record.filename.clone())
                .or_insert_with(HashSet::new)
                .extend(lines);
        }

        Ok(Self { files })
    }

    /// True when `line` was added in `path`.
    pub fn contains(&self, path: &str, line: u32) -> bool {
        self.files.get(path).is_some_and(|set| set.contains(&line))
    }

    /// Added lines of `path`, if the file has any.
    pub fn lines(&self, path: &str) -> Option<&HashSet<u32>> {
        self.files.get(path)
    }

    /// Indexed file paths, in no particular order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Number of indexed files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<(String, HashSet<u32>)> for ChangedLineIndex {
    /// Builds an index from precomputed sets; empty sets are dropped.
    fn from_iter<I: IntoIterator<Item = (String, HashSet<u32>)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().filter(|(_, set)| !set.is_empty()).collect(),
        }
    }
}

/// Parses and resolves one file's patch into its added line numbers.
pub fn file_added_lines(file: &str, patch: &str) -> Result<Vec<u32>, DiffParseError> {
    let hunks = parse_hunks(file, patch)?;
    added_line_numbers(file, &hunks)
}
