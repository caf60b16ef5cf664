//! Engagement Prep CLI
//!
//! Data preparation toolkit for student-engagement research recordings.

use clap::{Parser, Subcommand};
use engagement_prep::{
    config::Config,
    core::ClassTable,
    download::{BlockingArchiveClient, FetchOutcome},
    pipeline::{aggregate_directory, build_report, label_directory, AggregateOutcome, LabelOutcome},
    segment::split_directory,
    VERSION,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "engagement-prep")]
#[command(author = "Sigmedia")]
#[command(version = VERSION)]
#[command(about = "Data preparation for student-engagement research", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mirror raw feature files from the dataset archive
    Download {
        /// Archive index URL (defaults to the configured dataset URL)
        #[arg(long)]
        url: Option<String>,

        /// Destination directory (defaults to the configured features path)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Accept an invalid TLS certificate chain from the archive host
        #[arg(long)]
        insecure: bool,
    },

    /// Aggregate raw annotation ratings into interval means
    Aggregate {
        /// Root directory of raw annotation CSVs
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Output directory for the aggregated CSVs
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Ratings per window
        #[arg(long)]
        window_size: Option<usize>,
    },

    /// Append engagement class labels to aggregated CSVs
    Label {
        /// Directory of aggregated CSVs to label in place
        #[arg(long, short)]
        dir: Option<PathBuf>,
    },

    /// Split session WAV recordings into fixed-length segments
    Segment {
        /// Directory of WAV recordings
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Output directory for the segments
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Segment length in seconds
        #[arg(long)]
        segment_length: Option<u32>,
    },

    /// Summarize the class distribution of the labeled dataset
    Report {
        /// Directory of labeled CSVs
        #[arg(long, short)]
        dir: Option<PathBuf>,

        /// Also write the report as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Show configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Download {
            url,
            output,
            insecure,
        } => cmd_download(url, output, insecure),
        Commands::Aggregate {
            input,
            output,
            window_size,
        } => cmd_aggregate(input, output, window_size),
        Commands::Label { dir } => cmd_label(dir),
        Commands::Segment {
            input,
            output,
            segment_length,
        } => cmd_segment(input, output, segment_length),
        Commands::Report { dir, json } => cmd_report(dir, json),
        Commands::Config => cmd_config(),
    }
}

fn cmd_download(url: Option<String>, output: Option<PathBuf>, insecure: bool) {
    let config = Config::load().unwrap_or_default();
    let url = url.unwrap_or_else(|| config.dataset_url.clone());
    let dest = output.unwrap_or_else(|| config.features_path.clone());
    let accept_invalid_certs = insecure || config.accept_invalid_certs;

    println!("Engagement Prep v{VERSION}");
    println!("Mirroring {url}");
    println!("Destination: {}", dest.display());
    println!();

    let client = match BlockingArchiveClient::new(&url, accept_invalid_certs) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let outcomes = match client.mirror(&dest) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            eprintln!("Error fetching archive index: {e}");
            std::process::exit(1);
        }
    };

    let mut downloaded = 0usize;
    let mut skipped = 0usize;
    let mut errors: Vec<String> = Vec::new();

    for outcome in outcomes {
        match outcome {
            Ok(FetchOutcome::Downloaded { path, bytes }) => {
                println!("Downloaded: {} ({bytes} bytes)", path.display());
                downloaded += 1;
            }
            Ok(FetchOutcome::SkippedExisting { path }) => {
                println!("Skipping {} - already exists", path.display());
                skipped += 1;
            }
            Ok(FetchOutcome::NotAFile { url }) => {
                println!("Skipping (not a file): {url}");
            }
            Err(e) => {
                eprintln!("{e}");
                errors.push(e.to_string());
            }
        }
    }

    println!();
    println!("Summary:");
    println!("  Downloaded: {downloaded} files");
    println!("  Skipped: {skipped} files");
    if !errors.is_empty() {
        println!("  Errors: {}", errors.len());
        std::process::exit(1);
    }
}

fn cmd_aggregate(input: Option<PathBuf>, output: Option<PathBuf>, window_size: Option<usize>) {
    let config = Config::load().unwrap_or_default();
    let input = input.unwrap_or_else(|| config.annotations_path.clone());
    let output = output.unwrap_or_else(|| config.aggregated_path.clone());
    let window_size = window_size.unwrap_or(config.window_size);

    if window_size == 0 {
        eprintln!("Error: window size must be at least 1");
        std::process::exit(1);
    }
    if !input.exists() {
        eprintln!("Error: input directory {} does not exist", input.display());
        std::process::exit(1);
    }

    println!("Aggregating annotations under {}", input.display());
    println!("Window size: {window_size} ratings");
    println!();

    let outcomes = aggregate_directory(&input, &output, window_size);
    if outcomes.is_empty() {
        println!("No CSV files found in {}", input.display());
        return;
    }

    let mut written = 0usize;
    let mut skipped = 0usize;
    let mut errors: Vec<String> = Vec::new();

    for outcome in outcomes {
        match outcome {
            AggregateOutcome::Written {
                input,
                output,
                ratings,
                windows,
            } => {
                println!("Processed: {}", input.display());
                println!("  {ratings} ratings into {windows} intervals");
                println!("  Saved to: {}", output.display());
                written += 1;
            }
            AggregateOutcome::SkippedExisting { input, .. } => {
                println!("Skipping {} - output already exists", input.display());
                skipped += 1;
            }
            AggregateOutcome::Empty { input } => {
                println!("No valid rating data found in {}", input.display());
            }
            AggregateOutcome::Failed { input, message } => {
                eprintln!("Error processing {}: {message}", input.display());
                errors.push(message);
            }
        }
    }

    println!();
    println!("Summary:");
    println!("  Aggregated: {written} files");
    println!("  Skipped: {skipped} files");
    if !errors.is_empty() {
        println!("  Errors: {}", errors.len());
        std::process::exit(1);
    }
}

fn cmd_label(dir: Option<PathBuf>) {
    let config = Config::load().unwrap_or_default();
    let dir = dir.unwrap_or_else(|| config.aggregated_path.clone());

    if !dir.exists() {
        eprintln!("Error: directory {} does not exist", dir.display());
        std::process::exit(1);
    }

    println!("Labeling aggregated files under {}", dir.display());
    println!();

    let table = ClassTable::default();
    let outcomes = label_directory(&dir, &table);
    if outcomes.is_empty() {
        println!("No CSV files found in {}", dir.display());
        return;
    }

    let mut labeled = 0usize;
    let mut errors: Vec<String> = Vec::new();

    for outcome in outcomes {
        match outcome {
            LabelOutcome::Labeled {
                path,
                rows,
                unlabeled,
            } => {
                if unlabeled > 0 {
                    println!(
                        "Processed: {} ({rows} rows, {unlabeled} unlabeled)",
                        path.display()
                    );
                } else {
                    println!("Processed: {} ({rows} rows)", path.display());
                }
                labeled += 1;
            }
            LabelOutcome::NoRatingColumn { path } => {
                println!("No 'Rating' column in {}", path.display());
            }
            LabelOutcome::Failed { path, message } => {
                eprintln!("Error processing {}: {message}", path.display());
                errors.push(message);
            }
        }
    }

    println!();
    println!("Summary:");
    println!("  Labeled: {labeled} files");
    if !errors.is_empty() {
        println!("  Errors: {}", errors.len());
        std::process::exit(1);
    }
}

fn cmd_segment(input: Option<PathBuf>, output: Option<PathBuf>, segment_length: Option<u32>) {
    let config = Config::load().unwrap_or_default();
    let input = input.unwrap_or_else(|| config.recordings_path.clone());
    let output = output.unwrap_or_else(|| config.segments_path.clone());
    let segment_seconds = segment_length.unwrap_or(config.segment_seconds);

    if segment_seconds == 0 {
        eprintln!("Error: segment length must be at least 1 second");
        std::process::exit(1);
    }
    if !input.exists() {
        eprintln!("Error: input directory {} does not exist", input.display());
        std::process::exit(1);
    }

    println!("Splitting recordings under {}", input.display());
    println!("Segment length: {segment_seconds}s");
    println!();

    let outcomes = match split_directory(&input, &output, segment_seconds) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if outcomes.is_empty() {
        println!("No audio files found in {}", input.display());
        return;
    }

    let mut split = 0usize;
    let mut errors: Vec<String> = Vec::new();

    for outcome in outcomes {
        match outcome {
            Ok(result) => {
                println!(
                    "Processed: {} ({:.1}s into {} segments)",
                    result.input.display(),
                    result.duration_secs,
                    result.segments
                );
                split += 1;
            }
            Err(e) => {
                eprintln!("{e}");
                errors.push(e.to_string());
            }
        }
    }

    println!();
    println!("Summary:");
    println!("  Split: {split} recordings");
    if !errors.is_empty() {
        println!("  Errors: {}", errors.len());
        std::process::exit(1);
    }
}

fn cmd_report(dir: Option<PathBuf>, json: Option<PathBuf>) {
    let config = Config::load().unwrap_or_default();
    let dir = dir.unwrap_or_else(|| config.aggregated_path.clone());

    if !dir.exists() {
        eprintln!("Error: directory {} does not exist", dir.display());
        std::process::exit(1);
    }

    let report = match build_report(&dir) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error building report: {e}");
            std::process::exit(1);
        }
    };

    println!("{}", report.summary());

    if let Some(path) = json {
        if let Err(e) = report.save_json(&path) {
            eprintln!("Error writing report: {e}");
            std::process::exit(1);
        }
        println!("Saved report to {}", path.display());
    }
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}
