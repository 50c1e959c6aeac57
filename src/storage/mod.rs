//! Storage abstractions for lead files.
//!
//! Intermediate files and the exported CSV live side by side in one
//! storage directory, scoped by niche slug:
//!
//! ```text
//! .tmp/
//! ├── config.toml                               # Optional configuration
//! ├── raw_places_cafes_new-york-city-usa.json   # Raw maps results
//! ├── enriched_cafes_new-york-city-usa.json     # Enriched records
//! └── leads_cafes_20260116_093012.csv           # Exported leads
//! ```

pub mod export;
pub mod local;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::Niche;

// Re-export for convenience
pub use export::{CsvWriter, WrittenCsv};
pub use local::{CleanupReport, LocalStorage};

/// Supplier of enriched lead files.
///
/// Discovery is separate from reading so the aggregation stage works on an
/// explicit list of files and can be driven without a real filesystem.
pub trait LeadSource {
    /// List the enriched files belonging to a niche, in load order.
    fn discover(&self, niche: &Niche) -> Result<Vec<PathBuf>>;

    /// Read the raw bytes of one file.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
}
