//! Transformation module.
//!
//! - Grouper: spreadsheet rows to gene records
//! - Pipeline: load, group, render and write in one call

pub mod grouper;
pub mod pipeline;

pub use grouper::{group_by_gene, is_missing_key, GroupingResult, SkippedRow};
pub use pipeline::*;
