use std::io;
use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, Result};

use super::model::DataSet;

/// Lines starting with this marker are ignored.
const COMMENT: char = '#';

// ---------------------------------------------------------------------------
// Folder discovery
// ---------------------------------------------------------------------------

/// List the `*.txt` measurement files directly inside `dir`, sorted by name.
///
/// Subdirectories are not searched.
pub fn discover_data_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| AnalysisError::NotFound {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(".txt"))
        })
        .collect();

    if files.is_empty() {
        return Err(AnalysisError::NoDataFiles {
            dir: dir.to_path_buf(),
        });
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

// ---------------------------------------------------------------------------
// Two-column text loader
// ---------------------------------------------------------------------------

/// Load a whitespace-delimited measurement file.
///
/// Layout: one sample per row, column 0 is binding energy, column 1 is
/// intensity. Extra columns are allowed but every row must have the same
/// count. Blank lines and `#` comments are skipped; there is no header.
pub fn load_txt(path: &Path) -> Result<DataSet> {
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::InvalidData => AnalysisError::FileFormat {
            path: path.to_path_buf(),
            line: 0,
            reason: "file is not valid UTF-8 text".to_string(),
        },
        _ => AnalysisError::NotFound {
            path: path.to_path_buf(),
            source,
        },
    })?;

    parse_columns(&text).map_err(|(line, reason)| AnalysisError::FileFormat {
        path: path.to_path_buf(),
        line,
        reason,
    })
}

/// Parse the text body; errors carry the 1-based line number.
fn parse_columns(text: &str) -> std::result::Result<DataSet, (usize, String)> {
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut n_columns: Option<usize> = None;

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let content = match raw.find(COMMENT) {
            Some(pos) => &raw[..pos],
            None => raw,
        };

        let values = content
            .split_whitespace()
            .enumerate()
            .map(|(col, tok)| {
                tok.parse::<f64>()
                    .map_err(|_| (line_no, format!("column {col}: '{tok}' is not a number")))
            })
            .collect::<std::result::Result<Vec<f64>, _>>()?;

        if values.is_empty() {
            continue;
        }

        match n_columns {
            None if values.len() < 2 => {
                return Err((
                    line_no,
                    format!("expected at least 2 columns, found {}", values.len()),
                ));
            }
            None => n_columns = Some(values.len()),
            Some(n) if n != values.len() => {
                return Err((
                    line_no,
                    format!("expected {n} columns, found {}", values.len()),
                ));
            }
            Some(_) => {}
        }

        x.push(values[0]);
        y.push(values[1]);
    }

    DataSet::new(x, y).ok_or_else(|| (0, "no data rows".to_string()))
}
