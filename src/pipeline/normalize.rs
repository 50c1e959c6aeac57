//! Projection of lead records onto CSV rows.

use crate::models::{CategoryConfig, Config, LeadRecord, LeadRow, Niche};

/// Build the CSV row for a record.
///
/// Text fields are trimmed and the email lowercased. Records without a
/// source label get the configured default.
pub fn normalize(record: &LeadRecord, niche: &Niche, config: &Config) -> LeadRow {
    let source = match record.source.trim() {
        "" => config.output.default_source.clone(),
        source => source.to_string(),
    };

    LeadRow {
        business_name: record.business_name.trim().to_string(),
        address: record.address.trim().to_string(),
        owner_name: record.owner_name.trim().to_string(),
        email: record.email.trim().to_lowercase(),
        phone: record.phone.trim().to_string(),
        website: record.website.trim().to_string(),
        category: category_for(record, niche, &config.categories),
        city: record.city.trim().to_string(),
        source,
    }
}

/// Normalize every record, preserving order.
pub fn normalize_all(records: &[LeadRecord], niche: &Niche, config: &Config) -> Vec<LeadRow> {
    records
        .iter()
        .map(|record| normalize(record, niche, config))
        .collect()
}

/// Explicit category if present, otherwise one picked from the place types.
fn category_for(record: &LeadRecord, niche: &Niche, categories: &CategoryConfig) -> String {
    match record.category.trim() {
        "" => pick_category(&record.types, niche.name(), categories),
        category => category.to_string(),
    }
}

/// Choose a human-readable category from maps place types.
///
/// Generic tags are ignored. A tag mentioning a word of the niche wins,
/// then the first specific tag; with none left the niche itself is used.
pub fn pick_category(types: &[String], niche: &str, categories: &CategoryConfig) -> String {
    let specific: Vec<&str> = types
        .iter()
        .map(String::as_str)
        .filter(|tag| !categories.is_generic(tag))
        .collect();

    let niche_lower = niche.to_lowercase();
    let niche_words: Vec<&str> = niche_lower.split_whitespace().collect();

    let chosen = specific
        .iter()
        .find(|tag| {
            let tag = tag.to_lowercase();
            niche_words.iter().any(|word| tag.contains(word))
        })
        .or_else(|| specific.first());

    match chosen {
        Some(tag) => tag.replace('_', " "),
        None => niche.to_string(),
    }
}
