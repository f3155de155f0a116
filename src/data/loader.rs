use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{Dataset, Record, RowIssue, RowPolicy};
use super::tokenizer::{DELIMITER, tokenize};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read a death-rate CSV from disk and build the dataset snapshot.
pub fn load_file(path: &Path, policy: RowPolicy) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_text(&text, policy).with_context(|| format!("parsing {}", path.display()))
}

/// Build a dataset from the full CSV payload.
///
/// CSV layout: one header row (discarded), then rows of
/// `name,code,year,ozone,pollution,particulate`; any field may be
/// double-quoted to escape embedded commas. Empty lines are ignored.
pub fn parse_text(text: &str, policy: RowPolicy) -> Result<Dataset> {
    let mut dataset = Dataset::default();

    for (idx, line) in text.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let row = tokenize(line, DELIMITER);

        match Record::from_fields(&row, policy) {
            Ok(record) => {
                if !record.is_complete() {
                    log::warn!("line {line_no}: non-numeric rate kept as NaN ({line:?})");
                }
                dataset.records.push(record);
            }
            Err(error) => {
                if policy == RowPolicy::Reject {
                    bail!("line {line_no}: {error}");
                }
                log::warn!("line {line_no}: row dropped: {error}");
                dataset.issues.push(RowIssue {
                    line: line_no,
                    error,
                });
            }
        }
    }

    Ok(dataset)
}
