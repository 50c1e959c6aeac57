//! Application configuration structures.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::utils::fs::load_toml;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// File naming conventions for inputs and outputs
    #[serde(default)]
    pub files: FilesConfig,

    /// CSV output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Category selection rules
    #[serde(default)]
    pub categories: CategoryConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_toml(path.as_ref())
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let prefixes = [
            ("files.enriched_prefix", &self.files.enriched_prefix),
            ("files.raw_prefix", &self.files.raw_prefix),
            ("files.output_prefix", &self.files.output_prefix),
        ];
        for (key, value) in prefixes {
            if value.trim().is_empty() {
                return Err(AppError::config(format!("{key} is empty")));
            }
            if value.contains(['/', '\\']) {
                return Err(AppError::config(format!(
                    "{key} must not contain path separators"
                )));
            }
        }
        if self.files.enriched_prefix == self.files.raw_prefix {
            return Err(AppError::config(
                "files.enriched_prefix and files.raw_prefix must differ",
            ));
        }
        if self.output.default_source.trim().is_empty() {
            return Err(AppError::config("output.default_source is empty"));
        }
        Ok(())
    }

    /// Directory the CSV is written to, relative to the storage directory.
    pub fn output_dir(&self, storage_dir: &Path) -> PathBuf {
        if self.files.output_dir.trim().is_empty() {
            storage_dir.to_path_buf()
        } else {
            storage_dir.join(&self.files.output_dir)
        }
    }
}

/// Naming conventions for intermediate and output files.
///
/// Files are named `{prefix}_{niche_slug}_{suffix}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Prefix of enriched record files
    #[serde(default = "defaults::enriched_prefix")]
    pub enriched_prefix: String,

    /// Prefix of raw place files
    #[serde(default = "defaults::raw_prefix")]
    pub raw_prefix: String,

    /// Prefix of generated CSV files
    #[serde(default = "defaults::output_prefix")]
    pub output_prefix: String,

    /// CSV output directory (empty: the storage directory)
    #[serde(default)]
    pub output_dir: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            enriched_prefix: defaults::enriched_prefix(),
            raw_prefix: defaults::raw_prefix(),
            output_prefix: defaults::output_prefix(),
            output_dir: String::new(),
        }
    }
}

/// CSV output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Source label for records that do not carry one
    #[serde(default = "defaults::default_source")]
    pub default_source: String,

    /// Lead count below which a run is reported as short
    #[serde(default = "defaults::min_leads")]
    pub min_leads: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_source: defaults::default_source(),
            min_leads: defaults::min_leads(),
        }
    }
}

/// Category selection rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Place type tags too broad to describe a business
    #[serde(default = "defaults::generic_types")]
    pub generic_types: Vec<String>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            generic_types: defaults::generic_types(),
        }
    }
}

impl CategoryConfig {
    /// Whether a place type tag is generic.
    pub fn is_generic(&self, tag: &str) -> bool {
        self.generic_types.iter().any(|g| g == tag)
    }
}

mod defaults {
    // File defaults
    pub fn enriched_prefix() -> String {
        "enriched".into()
    }
    pub fn raw_prefix() -> String {
        "raw_places".into()
    }
    pub fn output_prefix() -> String {
        "leads".into()
    }

    // Output defaults
    pub fn default_source() -> String {
        "google_maps".into()
    }
    pub fn min_leads() -> usize {
        1000
    }

    // Category defaults
    pub fn generic_types() -> Vec<String> {
        [
            "point_of_interest",
            "establishment",
            "food",
            "store",
            "health",
            "gym",
            "local_business",
            "premise",
            "route",
            "street_address",
            "locality",
            "political",
            "geocode",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_prefix() {
        let mut config = Config::default();
        config.files.output_prefix = "  ".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn validate_rejects_path_separator() {
        let mut config = Config::default();
        config.files.enriched_prefix = "../enriched".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_same_input_prefixes() {
        let mut config = Config::default();
        config.files.raw_prefix = config.files.enriched_prefix.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_source() {
        let mut config = Config::default();
        config.output.default_source = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [output]
            min_leads = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.output.min_leads, 250);
        assert_eq!(config.output.default_source, "google_maps");
        assert_eq!(config.files.enriched_prefix, "enriched");
        assert!(config.categories.is_generic("establishment"));
    }

    #[test]
    fn load_or_default_falls_back() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_or_default(tmp.path().join("missing.toml"));
        assert_eq!(config.output.min_leads, 1000);
    }

    #[test]
    fn load_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[files]\noutput_prefix = \"export\"\noutput_dir = \"out\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.files.output_prefix, "export");
        assert_eq!(config.output_dir(tmp.path()), tmp.path().join("out"));
    }

    #[test]
    fn output_dir_defaults_to_storage_dir() {
        let config = Config::default();
        assert_eq!(config.output_dir(Path::new(".tmp")), PathBuf::from(".tmp"));
    }
}
