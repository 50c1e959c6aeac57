//! CSV export of deduplicated leads.
//!
//! Rows are written to a sibling `.tmp` file which is synced and then
//! linked into the final path, so a reader never observes a partial CSV.
//! An existing CSV at the final path is never replaced.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::{AppError, Result};
use crate::models::{LeadRow, Niche};
use crate::utils::fs::ensure_dir;

/// Timestamp format embedded in output file names.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Metadata about a finished CSV export.
#[derive(Debug, Clone)]
pub struct WrittenCsv {
    /// Final location of the CSV
    pub path: PathBuf,
    /// Data rows written (header excluded)
    pub row_count: usize,
    /// File size in bytes
    pub bytes: u64,
}

/// Writer producing one timestamped CSV per invocation.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    output_dir: PathBuf,
    prefix: String,
}

impl CsvWriter {
    /// Create a writer emitting `{prefix}_{niche}_{timestamp}.csv` files.
    pub fn new(output_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Path of the CSV for a niche generated at the given time.
    pub fn output_path(&self, niche: &Niche, generated_at: NaiveDateTime) -> PathBuf {
        self.output_dir.join(format!(
            "{}_{}_{}.csv",
            self.prefix,
            niche.slug(),
            generated_at.format(TIMESTAMP_FORMAT)
        ))
    }

    /// Write the rows atomically.
    ///
    /// On failure the temporary file is removed and any CSV already at the
    /// final path is left untouched.
    pub fn write(
        &self,
        niche: &Niche,
        rows: &[LeadRow],
        generated_at: NaiveDateTime,
    ) -> Result<WrittenCsv> {
        let path = self.output_path(niche, generated_at);
        ensure_dir(&self.output_dir).map_err(|e| AppError::write(&path, e))?;

        let tmp = temp_path(&path);
        let bytes = match write_rows(&tmp, rows) {
            Ok(bytes) => bytes,
            Err(e) => {
                discard(&tmp);
                return Err(AppError::write(&path, e));
            }
        };

        let published = publish(&tmp, &path);
        discard(&tmp);
        published?;

        log::debug!("Wrote {} rows ({} bytes) to {}", rows.len(), bytes, path.display());

        Ok(WrittenCsv {
            path,
            row_count: rows.len(),
            bytes,
        })
    }
}

/// Link the finished temporary file to `path`, failing if `path` exists.
fn publish(tmp: &Path, path: &Path) -> Result<()> {
    fs::hard_link(tmp, path).map_err(|e| match e.kind() {
        std::io::ErrorKind::AlreadyExists => AppError::write(path, "output file already exists"),
        _ => AppError::write(path, e),
    })
}

/// Temporary sibling of the final output path.
fn temp_path(path: &Path) -> PathBuf {
    path.with_extension("csv.tmp")
}

/// Serialize header and rows into `path`, returning the file size.
fn write_rows(path: &Path, rows: &[LeadRow]) -> Result<u64> {
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(file);

    writer.write_record(LeadRow::COLUMNS)?;
    for row in rows {
        writer.write_record(row.fields())?;
    }
    writer.flush()?;

    let file = writer
        .into_inner()
        .map_err(|e| AppError::Io(std::io::Error::other(e.to_string())))?;
    file.sync_all()?;
    Ok(file.metadata()?.len())
}

/// Best-effort removal of a temporary file.
fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            log::warn!("Could not remove temporary file {}: {}", path.display(), e);
        }
    }
}
