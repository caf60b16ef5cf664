//! Core rating transforms.
//!
//! This module contains:
//! - Interval aggregation of ratings into windowed means
//! - Class labeling of ratings via an ordered boundary table
//!
//! Both are pure, single-pass transforms; all file and network I/O lives in
//! the surrounding pipeline modules.

pub mod aggregate;
pub mod label;

// Re-export commonly used items
pub use aggregate::{aggregate, Aggregate, WindowMean};
pub use label::{label, ClassRule, ClassTable, DEFAULT_RULES};
