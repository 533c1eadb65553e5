use std::fs;
use std::path::Path;

use crate::error::TablesError;

/// Reads a table file and yields its non-comment, non-blank lines, each split into
/// whitespace-separated tokens, trimmed.
///
/// Blank lines are skipped; a line whose first non-whitespace characters are `//` is
/// treated as a comment and skipped too.
pub(crate) fn read_records(path: &Path) -> Result<Vec<Vec<String>>, TablesError> {
    let text = fs::read_to_string(path).map_err(|source| TablesError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        records.push(line.split_whitespace().map(str::to_owned).collect());
    }
    Ok(records)
}
