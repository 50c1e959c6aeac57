// src/pipeline/build.rs

//! Lead build pipeline: Aggregate → Deduplicate → Write CSV.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::models::{BuildSummary, Config, LeadRow, Niche};
use crate::storage::{CsvWriter, LeadSource, WrittenCsv};

use super::aggregate::{Aggregation, aggregate};
use super::dedup::{DedupOutcome, deduplicate};
use super::normalize::normalize_all;

/// Result of a full build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub summary: BuildSummary,
    pub output: WrittenCsv,
}

/// Records ready for export, with the summary describing how they were produced.
#[derive(Debug, Clone)]
pub struct PreparedLeads {
    pub rows: Vec<LeadRow>,
    pub summary: BuildSummary,
}

/// Aggregate and deduplicate a niche's files without writing anything.
pub fn prepare(config: &Config, source: &dyn LeadSource, niche: &Niche) -> Result<PreparedLeads> {
    let files = source.discover(niche)?;
    log::info!(
        "Loading {} enriched files for niche '{}'",
        files.len(),
        niche
    );
    if files.is_empty() {
        log::warn!("No enriched files found for niche '{}'", niche);
    }

    let mut aggregation = aggregate(source, &files);
    let total_before = aggregation.records.len();
    log::info!("Total before dedup: {}", total_before);

    let deduped = deduplicate(std::mem::take(&mut aggregation.records));
    log::info!("Total after dedup:  {}", deduped.records.len());

    let rows = normalize_all(&deduped.records, niche, config);
    let summary = summarize(
        &aggregation,
        total_before,
        &deduped,
        &rows,
        config.output.min_leads,
    );

    if summary.below_minimum {
        log::warn!(
            "Only {} unique leads (minimum {}). Consider adding more cities or niche synonyms.",
            summary.total_after_dedup,
            config.output.min_leads
        );
    }

    Ok(PreparedLeads { rows, summary })
}

/// Run the full build and write the CSV.
pub fn run_build(
    config: &Config,
    source: &dyn LeadSource,
    writer: &CsvWriter,
    niche: &Niche,
    generated_at: NaiveDateTime,
) -> Result<BuildReport> {
    let prepared = prepare(config, source, niche)?;
    let output = writer.write(niche, &prepared.rows, generated_at)?;

    log::info!("CSV written to: {}", output.path.display());

    Ok(BuildReport {
        summary: prepared.summary,
        output,
    })
}

/// Compute the reporting summary from the stage outputs.
fn summarize(
    aggregation: &Aggregation,
    total_before: usize,
    deduped: &DedupOutcome,
    rows: &[LeadRow],
    min_leads: usize,
) -> BuildSummary {
    let cities: HashSet<&str> = rows
        .iter()
        .map(|r| r.city.as_str())
        .filter(|c| !c.is_empty())
        .collect();

    BuildSummary {
        total_before_dedup: total_before,
        total_after_dedup: rows.len(),
        dropped_by_place_id: deduped.dropped_by_place_id,
        dropped_by_email: deduped.dropped_by_email,
        with_email: filled(rows, |r| &r.email),
        with_owner: filled(rows, |r| &r.owner_name),
        with_phone: filled(rows, |r| &r.phone),
        with_website: filled(rows, |r| &r.website),
        distinct_cities: cities.len(),
        files_loaded: aggregation.files_loaded,
        files_skipped: aggregation.skipped.len(),
        malformed_records: aggregation.malformed_records,
        below_minimum: rows.len() < min_leads,
        digest: deduped.digest(),
    }
}

/// Number of rows where `field` is non-empty.
fn filled(rows: &[LeadRow], field: impl Fn(&LeadRow) -> &String) -> usize {
    rows.iter().filter(|&row| !field(row).is_empty()).count()
}
