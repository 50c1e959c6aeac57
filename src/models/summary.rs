//! Build summary reported after each run.

use serde::Serialize;

/// Counts describing one aggregation + deduplication run.
///
/// Recoverable problems (skipped files, malformed records) are reported
/// here instead of failing the run, so the caller can decide whether the
/// result is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    /// Records loaded across all files
    pub total_before_dedup: usize,
    /// Records kept after deduplication
    pub total_after_dedup: usize,
    pub dropped_by_place_id: usize,
    pub dropped_by_email: usize,

    /// Kept records with a non-empty email
    pub with_email: usize,
    pub with_owner: usize,
    pub with_phone: usize,
    pub with_website: usize,

    /// Distinct non-empty city labels among kept records
    pub distinct_cities: usize,

    pub files_loaded: usize,
    pub files_skipped: usize,
    pub malformed_records: usize,

    /// Kept total is under the configured minimum
    pub below_minimum: bool,

    /// SHA-256 of the deduplicated record sequence (lowercase hex)
    pub digest: String,
}

impl BuildSummary {
    /// Integer percentage of `n` relative to the kept total.
    pub fn percent(&self, n: usize) -> usize {
        if self.total_after_dedup == 0 {
            0
        } else {
            100 * n / self.total_after_dedup
        }
    }
}
