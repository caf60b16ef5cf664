//! Labeling pass: append a `class` column to aggregated CSVs.
//!
//! Each aggregated file is rewritten in place with one extra column holding
//! the class of its `Rating` value. Out-of-range and unparsable ratings get
//! an empty cell, not an error. Re-running the pass overwrites an existing
//! `class` column instead of appending a second one.

use crate::core::ClassTable;
use crate::pipeline::{find_csv_files, PipelineError};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of labeling one aggregated file.
#[derive(Debug)]
pub enum LabelOutcome {
    /// Class column written
    Labeled {
        path: PathBuf,
        rows: usize,
        unlabeled: usize,
    },
    /// The file has no `Rating` column
    NoRatingColumn { path: PathBuf },
    /// The file could not be processed
    Failed { path: PathBuf, message: String },
}

/// Append (or refresh) the `class` column of one aggregated CSV.
pub fn label_file(path: &Path, table: &ClassTable) -> Result<LabelOutcome, PipelineError> {
    let content =
        fs::read_to_string(path).map_err(|e| PipelineError::Io(format!("{}: {e}", path.display())))?;

    let mut lines = content.lines();
    let header = match lines.next() {
        Some(h) => h,
        None => {
            return Ok(LabelOutcome::NoRatingColumn {
                path: path.to_path_buf(),
            })
        }
    };

    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let rating_column = match columns.iter().position(|c| *c == "Rating") {
        Some(i) => i,
        None => {
            return Ok(LabelOutcome::NoRatingColumn {
                path: path.to_path_buf(),
            })
        }
    };
    let class_column = columns.iter().position(|c| *c == "class");

    let mut output = String::new();
    if class_column.is_some() {
        output.push_str(header);
    } else {
        output.push_str(header);
        output.push_str(",class");
    }
    output.push('\n');

    let mut rows = 0usize;
    let mut unlabeled = 0usize;
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let mut fields: Vec<String> = line.split(',').map(|f| f.to_string()).collect();
        let class = fields
            .get(rating_column)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .and_then(|rating| table.label(rating));

        let cell = class.map(|c| c.to_string()).unwrap_or_default();
        if cell.is_empty() {
            unlabeled += 1;
        }

        match class_column {
            Some(i) if i < fields.len() => fields[i] = cell,
            _ => fields.push(cell),
        }

        output.push_str(&fields.join(","));
        output.push('\n');
        rows += 1;
    }

    fs::write(path, output).map_err(|e| PipelineError::Io(format!("{}: {e}", path.display())))?;

    Ok(LabelOutcome::Labeled {
        path: path.to_path_buf(),
        rows,
        unlabeled,
    })
}

/// Label every aggregated CSV under `dir` in place.
pub fn label_directory(dir: &Path, table: &ClassTable) -> Vec<LabelOutcome> {
    find_csv_files(dir)
        .into_iter()
        .map(|path| {
            label_file(&path, table).unwrap_or_else(|e| LabelOutcome::Failed {
                path,
                message: e.to_string(),
            })
        })
        .collect()
}
