//! Pipeline stages for building a lead list.
//!
//! - `aggregate`: Load and concatenate enriched files
//! - `dedup`: Two-phase keep-first deduplication
//! - `normalize`: Project records onto CSV rows
//! - `build`: Run the stages end to end and summarize

pub mod aggregate;
pub mod build;
pub mod dedup;
pub mod normalize;

pub use aggregate::{Aggregation, SkippedFile, aggregate};
pub use build::{BuildReport, PreparedLeads, prepare, run_build};
pub use dedup::{DedupOutcome, deduplicate};
pub use normalize::{normalize, normalize_all, pick_category};
