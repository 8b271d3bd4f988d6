//! Translation of destination-side hunks into absolute added line numbers.

use crate::errors::DiffParseError;
use crate::parser::Hunk;

/// Computes the destination line number of every added line, in patch order.
///
/// Destination ranges number only surviving lines (context + added), and
/// removed lines were dropped while parsing, so a counter starting at
/// `new_start` and bumped once per body line reproduces absolute numbering.
///
/// # Errors
/// [`DiffParseError::Overflow`] if a hunk runs past `u32::MAX`.
pub fn added_line_numbers(file: &str, hunks: &[Hunk]) -> Result<Vec<u32>, DiffParseError> {
    let mut out = Vec::new();

    for hunk in hunks {
        let mut line_no = hunk.new_start;
        let last = hunk.lines.len().saturating_sub(1);

        for (i, line) in hunk.lines.iter().enumerate() {
            if line.is_added() {
                out.push(line_no);
            }
            // The counter only has to be valid for lines still to come.
            if i < last {
                line_no = line_no.checked_add(1).ok_or_else(|| DiffParseError::Overflow {
                    file: file.to_string(),
                })?;
            }
        }
    }

    Ok(out)
}
