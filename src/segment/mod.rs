//! Fixed-length segmentation of session recordings.
//!
//! This module contains:
//! - Pure segment-boundary planning over a frame count
//! - WAV splitting that executes a plan with `hound`

pub mod audio;
pub mod plan;

pub use audio::{split_directory, split_wav, SegmentError, SplitOutcome};
pub use plan::{frames_per_segment, segment_file_name, Segment, SegmentPlan};
