//! Lead record and CSV row structures.

use serde::{Deserialize, Deserializer};

/// A business lead as produced by the search and enrichment steps.
///
/// Every text field falls back to an empty string when it is missing or
/// `null` in the source JSON, so downstream stages never see absent data.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct LeadRecord {
    /// Maps place identifier (empty for manually sourced records)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub place_id: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub business_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub website: String,

    /// Explicit category, if the source already settled on one
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,

    /// Contact name scraped from the website
    #[serde(default, deserialize_with = "null_as_empty")]
    pub owner_name: String,

    /// Contact email scraped from the website
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,

    /// City label used during collection
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,

    /// Origin channel
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,

    /// Maps place type tags (e.g. `cafe`, `point_of_interest`)
    #[serde(default, deserialize_with = "null_as_empty_list")]
    pub types: Vec<String>,
}

impl LeadRecord {
    /// Place identifier used for deduplication, if any.
    ///
    /// Ids are opaque and compared exactly as given.
    pub fn place_key(&self) -> Option<&str> {
        (!self.place_id.is_empty()).then_some(self.place_id.as_str())
    }

    /// Normalized email used for deduplication, if any.
    pub fn email_key(&self) -> Option<String> {
        let key = self.email.trim();
        (!key.is_empty()).then(|| key.to_lowercase())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_empty_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One row of the exported CSV.
///
/// Field order is the column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadRow {
    pub business_name: String,
    pub address: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub category: String,
    pub city: String,
    pub source: String,
}

impl LeadRow {
    /// CSV header, in column order.
    pub const COLUMNS: [&'static str; 9] = [
        "business_name",
        "address",
        "owner_name",
        "email",
        "phone",
        "website",
        "category",
        "city",
        "source",
    ];

    /// Row values, in column order.
    pub fn fields(&self) -> [&str; 9] {
        [
            self.business_name.as_str(),
            self.address.as_str(),
            self.owner_name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.website.as_str(),
            self.category.as_str(),
            self.city.as_str(),
            self.source.as_str(),
        ]
    }
}
