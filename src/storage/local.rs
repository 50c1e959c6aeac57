//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── config.toml                     # Builder Configuration
//! ├── {raw}_{niche}_{city}.json       # Raw maps results per city
//! ├── {enriched}_{niche}_{city}.json  # Enriched records per city
//! └── {output}_{niche}_{stamp}.csv    # Exported leads
//! ```
//!
//! Prefixes come from [`FilesConfig`]. A missing root directory is treated
//! as empty.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::{Config, FilesConfig, Niche};
use crate::storage::{CsvWriter, LeadSource};
use crate::utils::fs::file_size;

/// Files at or below this size are treated as not yet produced.
const MIN_USEFUL_BYTES: u64 = 10;

/// Outcome of removing a niche's intermediate files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub files_removed: usize,
    pub bytes_freed: u64,
}

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    files: FilesConfig,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>, files: FilesConfig) -> Self {
        Self {
            root_dir: root_dir.into(),
            files,
        }
    }

    /// CSV writer targeting the configured output directory.
    pub fn csv_writer(&self, config: &Config) -> CsvWriter {
        CsvWriter::new(
            config.output_dir(&self.root_dir),
            config.files.output_prefix.clone(),
        )
    }

    /// File-name stem shared by all files of one kind for a niche.
    fn stem(prefix: &str, niche: &Niche) -> String {
        format!("{}_{}_", prefix, niche.slug())
    }

    /// List `{prefix}_{niche}_*.json` files, sorted by path.
    fn list_niche_files(&self, prefix: &str, niche: &Niche) -> Result<Vec<PathBuf>> {
        let stem = Self::stem(prefix, niche);
        let entries = match fs::read_dir(&self.root_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("Storage directory {} does not exist", self.root_dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.starts_with(&stem) && name.ends_with(".json") && entry.path().is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Suffix of a niche file name, i.e. the city slug.
    fn city_slug(path: &Path, stem: &str) -> Option<String> {
        path.file_name()?
            .to_str()?
            .strip_prefix(stem)?
            .strip_suffix(".json")
            .map(String::from)
    }

    /// Raw place files for a niche.
    pub fn raw_files(&self, niche: &Niche) -> Result<Vec<PathBuf>> {
        self.list_niche_files(&self.files.raw_prefix, niche)
    }

    /// City slugs with raw results but no usable enriched file.
    pub fn missing_enrichment(&self, niche: &Niche) -> Result<Vec<String>> {
        let raw_stem = Self::stem(&self.files.raw_prefix, niche);
        let enriched_stem = Self::stem(&self.files.enriched_prefix, niche);

        let missing = self
            .raw_files(niche)?
            .iter()
            .filter_map(|raw| Self::city_slug(raw, &raw_stem))
            .filter(|city| {
                let enriched = self.root_dir.join(format!("{enriched_stem}{city}.json"));
                file_size(&enriched) <= MIN_USEFUL_BYTES
            })
            .collect();
        Ok(missing)
    }

    /// Delete the raw and enriched JSON files of a niche.
    pub fn clean_intermediates(&self, niche: &Niche) -> Result<CleanupReport> {
        let mut files = self.raw_files(niche)?;
        files.extend(self.discover(niche)?);

        let mut report = CleanupReport::default();
        for path in files {
            let size = file_size(&path);
            fs::remove_file(&path)?;
            log::debug!("Removed {}", path.display());
            report.files_removed += 1;
            report.bytes_freed += size;
        }
        Ok(report)
    }
}

impl LeadSource for LocalStorage {
    fn discover(&self, niche: &Niche) -> Result<Vec<PathBuf>> {
        self.list_niche_files(&self.files.enriched_prefix, niche)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }
}
