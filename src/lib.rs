//! Engagement Prep - data preparation for student-engagement research.
//!
//! This library prepares a student-engagement dataset: it mirrors raw feature
//! files from the corpus archive, aggregates per-row engagement ratings into
//! interval means, labels rows into discrete engagement classes, splits
//! session recordings into fixed-length clips, and summarizes the class
//! distribution of the prepared dataset.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       engagement-prep                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌───────────┐   ┌───────────┐   ┌─────────┐  │
//! │  │ download │   │  ingest   │──▶│ aggregate │──▶│  label  │  │
//! │  │ (mirror) │   │ (filter)  │   │ (windows) │   │ (table) │  │
//! │  └──────────┘   └───────────┘   └───────────┘   └─────────┘  │
//! │       │                                               │      │
//! │       ▼                                               ▼      │
//! │  ┌──────────┐                                   ┌─────────┐  │
//! │  │ segment  │                                   │ report  │  │
//! │  │  (WAV)   │                                   │ (stats) │  │
//! │  └──────────┘                                   └─────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two transforms in [`core`] are pure functions over rating sequences;
//! every other module is file or network plumbing around them.
//!
//! # Example
//!
//! ```
//! use engagement_prep::core::{aggregate, label};
//!
//! let means: Vec<_> = aggregate(vec![1.0, 1.0, 2.0, 2.0, 3.0], 2).collect();
//! assert_eq!(means.len(), 3);
//!
//! assert_eq!(label(0.5), Some(0));
//! assert_eq!(label(1.5), Some(1));
//! assert_eq!(label(2.5), None);
//! ```

pub mod config;
pub mod core;
pub mod download;
pub mod ingest;
pub mod pipeline;
pub mod segment;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError, DEFAULT_DATASET_URL};
pub use core::{aggregate, label, ClassRule, ClassTable, WindowMean};
pub use download::{ArchiveClient, BlockingArchiveClient, DownloadError, FetchOutcome};
pub use pipeline::{
    build_report, AggregateOutcome, LabelOutcome, PipelineError, Report,
};
pub use segment::{SegmentError, SegmentPlan, SplitOutcome};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
