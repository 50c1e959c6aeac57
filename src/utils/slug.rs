// src/utils/slug.rs

//! Slug generation for niche and city labels.

use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid slug regex"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_]+").expect("valid slug regex"));
static DASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("valid slug regex"));

/// Convert free text into a file-name friendly slug.
///
/// `"Coffee Shops"` becomes `"coffee-shops"`, `"New York City, USA"` becomes
/// `"new-york-city-usa"`. Word characters are Unicode-aware, so accented
/// letters survive.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let dashed = SEPARATORS.replace_all(&stripped, "-");
    let collapsed = DASHES.replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_string()
}
