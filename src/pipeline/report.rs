//! Report pass: class distribution over the labeled dataset.
//!
//! Walks the labeled CSVs, counts rows per engagement class, and produces a
//! text summary plus a JSON document for downstream charting.

use crate::pipeline::{find_csv_files, PipelineError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;
use std::path::Path;

/// Per-class statistics.
#[derive(Debug, Clone, Serialize)]
pub struct ClassCount {
    /// Class label
    pub class: u8,
    /// Number of labeled rows
    pub count: u64,
    /// Share of all labeled rows (0.0 to 1.0)
    pub share: f64,
    /// Mean of the aggregated ratings in this class
    pub mean_rating: f64,
    /// Standard deviation of the aggregated ratings in this class
    pub rating_std_dev: f64,
}

/// Class-distribution report over a labeled dataset directory.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
    /// Number of CSV files scanned
    pub files_scanned: usize,
    /// Rows carrying a class label
    pub labeled_rows: u64,
    /// Rows whose rating fell outside every class interval
    pub unlabeled_rows: u64,
    /// Per-class statistics, ordered by class label
    pub classes: Vec<ClassCount>,
}

/// Build a class-distribution report from the labeled CSVs under `dir`.
pub fn build_report(dir: &Path) -> Result<Report, PipelineError> {
    let files = find_csv_files(dir);
    // Per class: row count plus the parsable ratings behind those rows.
    let mut per_class: BTreeMap<u8, (u64, Vec<f64>)> = BTreeMap::new();
    let mut unlabeled_rows = 0u64;

    for path in &files {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::Io(format!("{}: {e}", path.display())))?;

        let mut lines = content.lines();
        let header: Vec<&str> = match lines.next() {
            Some(h) => h.split(',').map(str::trim).collect(),
            None => continue,
        };
        let rating_column = header.iter().position(|c| *c == "Rating");
        let class_column = match header.iter().position(|c| *c == "class") {
            Some(i) => i,
            // Not labeled yet; nothing to count.
            None => continue,
        };

        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            let class = fields.get(class_column).and_then(|c| c.trim().parse::<u8>().ok());
            let rating = rating_column
                .and_then(|i| fields.get(i))
                .and_then(|r| r.trim().parse::<f64>().ok());

            match class {
                Some(class) => {
                    let entry = per_class.entry(class).or_default();
                    entry.0 += 1;
                    if let Some(rating) = rating {
                        entry.1.push(rating);
                    }
                }
                None => unlabeled_rows += 1,
            }
        }
    }

    let labeled_rows: u64 = per_class.values().map(|(count, _)| *count).sum();
    let classes = per_class
        .into_iter()
        .map(|(class, (count, ratings))| {
            ClassCount {
                class,
                count,
                share: if labeled_rows > 0 {
                    count as f64 / labeled_rows as f64
                } else {
                    0.0
                },
                mean_rating: if ratings.is_empty() {
                    0.0
                } else {
                    ratings.iter().mean()
                },
                rating_std_dev: if ratings.len() > 1 {
                    ratings.iter().std_dev()
                } else {
                    0.0
                },
            }
        })
        .collect();

    Ok(Report {
        generated_at: Utc::now(),
        files_scanned: files.len(),
        labeled_rows,
        unlabeled_rows,
        classes,
    })
}

impl Report {
    /// Render a text summary with one bar per class.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str("Engagement Class Distribution\n");
        out.push_str("=============================\n");
        out.push_str(&format!("Files scanned: {}\n", self.files_scanned));
        out.push_str(&format!("Labeled rows: {}\n", self.labeled_rows));
        out.push_str(&format!("Unlabeled rows: {}\n", self.unlabeled_rows));
        out.push('\n');

        let max_count = self.classes.iter().map(|c| c.count).max().unwrap_or(0);
        for class in &self.classes {
            let width = if max_count > 0 {
                (class.count * 40 / max_count) as usize
            } else {
                0
            };
            out.push_str(&format!(
                "class {} | {:<40} {} ({:.1}%)  mean {:.3}, sd {:.3}\n",
                class.class,
                "#".repeat(width),
                class.count,
                class.share * 100.0,
                class.mean_rating,
                class.rating_std_dev,
            ));
        }

        if self.classes.is_empty() {
            out.push_str("No class data found.\n");
        }

        out
    }

    /// Write the report as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<(), PipelineError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PipelineError::Io(format!("serializing report: {e}")))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PipelineError::Io(format!("{}: {e}", parent.display())))?;
        }
        std::fs::write(path, json)
            .map_err(|e| PipelineError::Io(format!("{}: {e}", path.display())))?;
        Ok(())
    }
}
