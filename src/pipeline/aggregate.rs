// src/pipeline/aggregate.rs

//! Aggregation of enriched lead files.
//!
//! Files are loaded in the order given and their records concatenated.
//! A file that cannot be read or parsed is skipped; a record that is not a
//! lead-shaped object is dropped. Neither aborts the run.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::LeadRecord;
use crate::storage::LeadSource;

/// A file left out of the aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Records gathered from all files, in load order.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub records: Vec<LeadRecord>,
    pub files_loaded: usize,
    pub skipped: Vec<SkippedFile>,
    pub malformed_records: usize,
}

/// Load every file through `source` and concatenate the records.
pub fn aggregate(source: &dyn LeadSource, files: &[PathBuf]) -> Aggregation {
    let mut aggregation = Aggregation::default();

    for path in files {
        let parsed = source.read(path).and_then(|bytes| parse_file(path, &bytes));
        match parsed {
            Ok((records, malformed)) => {
                log::info!("Loaded {} records from {}", records.len(), path.display());
                aggregation.files_loaded += 1;
                aggregation.malformed_records += malformed;
                aggregation.records.extend(records);
            }
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                aggregation.skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    aggregation
}

/// Parse one file, returning its valid records and the malformed count.
fn parse_file(path: &Path, bytes: &[u8]) -> Result<(Vec<LeadRecord>, usize)> {
    let Value::Array(items) = serde_json::from_slice::<Value>(bytes)? else {
        return Err(AppError::validation("expected a JSON array of records"));
    };

    let mut records = Vec::with_capacity(items.len());
    let mut malformed = 0;
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            log::warn!("{} record #{}: not an object, dropped", path.display(), index);
            malformed += 1;
            continue;
        }
        match serde_json::from_value::<LeadRecord>(item) {
            Ok(record) => records.push(record),
            Err(e) => {
                log::warn!("{} record #{}: {}, dropped", path.display(), index, e);
                malformed += 1;
            }
        }
    }
    Ok((records, malformed))
}
