//! Annotation-file ingestion.
//!
//! Raw annotation CSVs open with a fixed metadata preamble, followed by
//! `timestamp,rating` rows. Blank or unparsable rating fields are dropped at
//! this boundary so the aggregator only ever sees valid numbers.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Number of metadata rows preceding the rating rows in a raw annotation file.
pub const METADATA_ROWS: usize = 9;

/// Extract the rating from one annotation row, if it has one.
///
/// Rows are `timestamp,rating[,...]`; anything without a second field, with an
/// empty second field, or with a non-numeric second field yields `None`.
pub fn parse_rating_field(line: &str) -> Option<f64> {
    let mut fields = line.trim().split(',');
    let _timestamp = fields.next()?;
    let raw = fields.next()?.trim();
    if raw.is_empty() {
        return None;
    }
    // "NaN"/"inf" parse as f64 but are not usable ratings.
    raw.parse().ok().filter(|rating: &f64| rating.is_finite())
}

/// Read the valid ratings from a raw annotation file, in row order.
///
/// Skips the metadata preamble and silently drops rows without a parsable
/// rating. An annotation file with no valid rows yields an empty vector; the
/// caller decides whether that is a no-op.
pub fn read_ratings(path: &Path) -> Result<Vec<f64>, std::io::Error> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut ratings = Vec::new();
    for (row, line) in reader.lines().enumerate() {
        let line = line?;
        if row < METADATA_ROWS {
            continue;
        }
        if let Some(rating) = parse_rating_field(&line) {
            ratings.push(rating);
        }
    }

    Ok(ratings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_valid_row() {
        assert_eq!(parse_rating_field("00:01:30,1.5"), Some(1.5));
        assert_eq!(parse_rating_field("00:01:32,-0.25,extra"), Some(-0.25));
    }

    #[test]
    fn test_parse_invalid_rows() {
        assert_eq!(parse_rating_field(""), None);
        assert_eq!(parse_rating_field("00:01:30"), None);
        assert_eq!(parse_rating_field("00:01:30,"), None);
        assert_eq!(parse_rating_field("00:01:30,a"), None);
        assert_eq!(parse_rating_field("a,,NaN"), None);
        assert_eq!(parse_rating_field("00:01:30,NaN"), None);
        assert_eq!(parse_rating_field("00:01:30,inf"), None);
    }

    #[test]
    fn test_read_ratings_skips_preamble_and_bad_rows() {
        let path = std::env::temp_dir().join("engagement-prep-ingest-test.csv");
        let mut file = File::create(&path).expect("create test file");
        for i in 0..METADATA_ROWS {
            writeln!(file, "meta,{i}").expect("write");
        }
        writeln!(file, "00:00:00,1.0").expect("write");
        writeln!(file, "00:00:02,").expect("write");
        writeln!(file, "00:00:04,oops").expect("write");
        writeln!(file, "00:00:06,-1.5").expect("write");
        drop(file);

        let ratings = read_ratings(&path).expect("read ratings");
        assert_eq!(ratings, vec![1.0, -1.5]);

        let _ = std::fs::remove_file(&path);
    }
}
