//! Batch pipelines over the dataset directories.
//!
//! Each pipeline is a straight-line pass over discovered CSV files: the
//! aggregation pass turns raw annotation files into interval means, the
//! labeling pass appends a class column, and the report pass summarizes the
//! class distribution.

pub mod aggregate;
pub mod label;
pub mod report;

pub use aggregate::{aggregate_directory, aggregate_file, AggregateOutcome};
pub use label::{label_directory, label_file, LabelOutcome};
pub use report::{build_report, ClassCount, Report};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Pipeline error types.
#[derive(Debug)]
pub enum PipelineError {
    /// File system error
    Io(String),
    /// A discovered file had an unusable shape
    Malformed(String),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Io(msg) => write!(f, "IO error: {msg}"),
            PipelineError::Malformed(msg) => write!(f, "Malformed file: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}

/// Recursively find `.csv` files under `root`, in a stable order.
pub fn find_csv_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}
