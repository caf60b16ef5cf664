//! Aggregation pass: raw annotation files to interval-mean files.
//!
//! Each annotation file under the input root becomes one `*_means.csv` file
//! in the output directory, named from the file's path relative to the root
//! with separators flattened to underscores. Existing outputs are skipped so
//! the pass can be re-run after adding new sessions.

use crate::core::aggregate;
use crate::ingest;
use crate::pipeline::{find_csv_files, PipelineError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Outcome of aggregating one annotation file.
#[derive(Debug)]
pub enum AggregateOutcome {
    /// Interval means written
    Written {
        input: PathBuf,
        output: PathBuf,
        ratings: usize,
        windows: usize,
    },
    /// Output already exists, input untouched
    SkippedExisting { input: PathBuf, output: PathBuf },
    /// No valid rating rows in the input
    Empty { input: PathBuf },
    /// The file could not be processed
    Failed { input: PathBuf, message: String },
}

/// Flattened output filename for an annotation file: the path relative to
/// `root` with separators replaced by underscores, suffixed `_means.csv`.
pub fn output_name(root: &Path, input: &Path) -> String {
    let relative = input.strip_prefix(root).unwrap_or(input);
    let stem = relative.with_extension("");
    let flat: Vec<String> = stem
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("{}_means.csv", flat.join("_"))
}

/// Aggregate one annotation file into an interval-mean CSV.
pub fn aggregate_file(
    input: &Path,
    root: &Path,
    output_dir: &Path,
    window_size: usize,
) -> Result<AggregateOutcome, PipelineError> {
    let output = output_dir.join(output_name(root, input));

    // Idempotence contract: re-runs never recompute finished outputs.
    if output.exists() {
        return Ok(AggregateOutcome::SkippedExisting {
            input: input.to_path_buf(),
            output,
        });
    }

    let ratings = ingest::read_ratings(input)
        .map_err(|e| PipelineError::Io(format!("{}: {e}", input.display())))?;

    if ratings.is_empty() {
        return Ok(AggregateOutcome::Empty {
            input: input.to_path_buf(),
        });
    }

    let rating_count = ratings.len();
    let means: Vec<_> = aggregate(ratings, window_size).collect();

    fs::create_dir_all(output_dir)
        .map_err(|e| PipelineError::Io(format!("{}: {e}", output_dir.display())))?;

    let mut file = fs::File::create(&output)
        .map_err(|e| PipelineError::Io(format!("{}: {e}", output.display())))?;
    writeln!(file, "interval,Rating")
        .map_err(|e| PipelineError::Io(format!("{}: {e}", output.display())))?;
    for mean in &means {
        writeln!(file, "{},{}", mean.index, mean.mean)
            .map_err(|e| PipelineError::Io(format!("{}: {e}", output.display())))?;
    }

    Ok(AggregateOutcome::Written {
        input: input.to_path_buf(),
        output,
        ratings: rating_count,
        windows: means.len(),
    })
}

/// Aggregate every annotation CSV under `root` into `output_dir`.
///
/// Per-file failures are reported as outcomes rather than aborting the pass.
pub fn aggregate_directory(
    root: &Path,
    output_dir: &Path,
    window_size: usize,
) -> Vec<AggregateOutcome> {
    find_csv_files(root)
        .into_iter()
        .map(|input| {
            aggregate_file(&input, root, output_dir, window_size).unwrap_or_else(|e| {
                AggregateOutcome::Failed {
                    input,
                    message: e.to_string(),
                }
            })
        })
        .collect()
}
