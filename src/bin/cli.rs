//! Lead Builder CLI
//!
//! Merges enriched lead files for a niche and exports them to CSV.

use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use leads::{
    error::Result,
    models::{BuildSummary, Config, Niche},
    pipeline,
    storage::LocalStorage,
};

/// Lead Builder - Deduplicated lead lists from enriched place data
#[derive(Parser, Debug)]
#[command(
    name = "leads",
    version,
    about = "Merge, deduplicate and export enriched business leads"
)]
struct Cli {
    /// Path to storage directory holding intermediate files and config.toml
    #[arg(short, long, default_value = ".tmp")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the deduplicated CSV for a niche
    Build {
        /// Business type used in the search (e.g. "cafes")
        #[arg(short, long)]
        niche: String,
    },

    /// Report what a build would produce without writing the CSV
    Inspect {
        #[arg(short, long)]
        niche: String,

        /// Print the summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Delete raw and enriched JSON files for a niche
    Clean {
        #[arg(short, long)]
        niche: String,
    },

    /// Validate configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Log the summary the way operators read it after a run.
fn log_summary(summary: &BuildSummary) {
    let line = |label: &str, n: usize| {
        log::info!("  {:<13}: {} ({}%)", label, n, summary.percent(n));
    };

    log::info!("  Total leads  : {}", summary.total_after_dedup);
    line("With email", summary.with_email);
    line("With owner", summary.with_owner);
    line("With phone", summary.with_phone);
    line("With website", summary.with_website);
    log::info!("  Cities       : {}", summary.distinct_cities);
    log::info!(
        "  Dropped      : {} by place_id, {} by email",
        summary.dropped_by_place_id,
        summary.dropped_by_email
    );
    if summary.files_skipped > 0 || summary.malformed_records > 0 {
        log::warn!(
            "  Skipped {} files and {} malformed records",
            summary.files_skipped,
            summary.malformed_records
        );
    }
    log::debug!("  Digest       : {}", summary.digest);
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);

    let storage = LocalStorage::new(&cli.storage_dir, config.files.clone());

    match cli.command {
        Command::Build { niche } => {
            config.validate()?;
            let niche = Niche::new(&niche)?;
            log::info!("Building leads for niche '{}'", niche);

            let writer = storage.csv_writer(&config);
            let generated_at = Local::now().naive_local();
            let report = pipeline::run_build(&config, &storage, &writer, &niche, generated_at)?;
            log_summary(&report.summary);
        }

        Command::Inspect { niche, json } => {
            let niche = Niche::new(&niche)?;
            let prepared = pipeline::prepare(&config, &storage, &niche)?;

            for city in storage.missing_enrichment(&niche)? {
                log::warn!("City '{}' has raw results but no enriched file", city);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&prepared.summary)?);
            } else {
                log_summary(&prepared.summary);
            }
        }

        Command::Clean { niche } => {
            let niche = Niche::new(&niche)?;
            let report = storage.clean_intermediates(&niche)?;
            log::info!(
                "Removed {} intermediate JSON files ({} KB freed)",
                report.files_removed,
                report.bytes_freed / 1024
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({})", config_path.display());
        }
    }

    Ok(())
}
