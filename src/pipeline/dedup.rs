//! Two-phase keep-first deduplication.
//!
//! Phase 1 drops records whose `place_id` was already seen. Phase 2 runs
//! over the phase 1 survivors and drops records whose email was already
//! seen. Empty keys never collide, and the earliest record always wins
//! wholesale: no fields are merged in from later duplicates.

use std::collections::HashSet;

use sha2::{Digest, Sha256};

use crate::models::LeadRecord;

/// Deduplicated records plus drop counts per key.
#[derive(Debug, Clone, Default)]
pub struct DedupOutcome {
    pub records: Vec<LeadRecord>,
    pub dropped_by_place_id: usize,
    pub dropped_by_email: usize,
}

impl DedupOutcome {
    /// Total records dropped by either phase.
    pub fn dropped(&self) -> usize {
        self.dropped_by_place_id + self.dropped_by_email
    }

    /// SHA-256 over the ordered record sequence, as lowercase hex.
    ///
    /// Equal inputs produce equal digests, so two runs can be compared
    /// without diffing their CSVs. Every field is length-prefixed.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        let mut put = |bytes: &[u8]| {
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        };
        for record in &self.records {
            for field in [
                &record.place_id,
                &record.business_name,
                &record.address,
                &record.phone,
                &record.website,
                &record.category,
                &record.owner_name,
                &record.email,
                &record.city,
                &record.source,
            ] {
                put(field.as_bytes());
            }
            put(&(record.types.len() as u64).to_le_bytes());
            for tag in &record.types {
                put(tag.as_bytes());
            }
        }
        hex::encode(hasher.finalize())
    }
}

/// Deduplicate by `place_id`, then by email, keeping first occurrences.
pub fn deduplicate(records: Vec<LeadRecord>) -> DedupOutcome {
    let before = records.len();

    let mut seen_places: HashSet<String> = HashSet::new();
    let by_place: Vec<LeadRecord> = records
        .into_iter()
        .filter(|record| match record.place_key() {
            Some(key) => seen_places.insert(key.to_string()),
            None => true,
        })
        .collect();
    let dropped_by_place_id = before - by_place.len();

    let mut seen_emails: HashSet<String> = HashSet::new();
    let survivors = by_place.len();
    let records: Vec<LeadRecord> = by_place
        .into_iter()
        .filter(|record| match record.email_key() {
            Some(key) => seen_emails.insert(key),
            None => true,
        })
        .collect();
    let dropped_by_email = survivors - records.len();

    log::debug!(
        "Dedup: {} → {} ({} by place_id, {} by email)",
        before,
        records.len(),
        dropped_by_place_id,
        dropped_by_email
    );

    DedupOutcome {
        records,
        dropped_by_place_id,
        dropped_by_email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(place_id: &str, email: &str) -> LeadRecord {
        LeadRecord {
            place_id: place_id.to_string(),
            email: email.to_string(),
            ..LeadRecord::default()
        }
    }

    fn keys(outcome: &DedupOutcome) -> Vec<(&str, &str)> {
        outcome
            .records
            .iter()
            .map(|r| (r.place_id.as_str(), r.email.as_str()))
            .collect()
    }

    #[test]
    fn test_same_place_id_keeps_first() {
        let outcome = deduplicate(vec![lead("P1", "a@x.com"), lead("P1", "b@y.com")]);
        assert_eq!(keys(&outcome), vec![("P1", "a@x.com")]);
        assert_eq!(outcome.dropped_by_place_id, 1);
        assert_eq!(outcome.dropped_by_email, 0);
    }

    #[test]
    fn test_same_email_without_place_id() {
        let outcome = deduplicate(vec![lead("", "c@z.com"), lead("", "c@z.com")]);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.dropped_by_email, 1);
    }

    #[test]
    fn test_empty_keys_never_merge() {
        let outcome = deduplicate(vec![lead("", ""), lead("", ""), lead("  ", " ")]);
        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.dropped(), 0);
    }

    #[test]
    fn test_place_ids_compare_exactly() {
        let outcome = deduplicate(vec![lead(" ", ""), lead(" ", ""), lead("P1", ""), lead(" P1", "")]);
        assert_eq!(keys(&outcome), vec![(" ", ""), ("P1", ""), (" P1", "")]);
        assert_eq!(outcome.dropped_by_place_id, 1);
    }

    #[test]
    fn test_later_complete_duplicate_is_still_dropped() {
        let mut later = lead("P1", "owner@cafe.com");
        later.owner_name = "Ada".to_string();

        let outcome = deduplicate(vec![lead("P1", ""), later]);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].email, "");
        assert_eq!(outcome.records[0].owner_name, "");
    }

    #[test]
    fn test_email_match_ignores_case_and_whitespace() {
        let outcome = deduplicate(vec![lead("P1", "Info@Cafe.com"), lead("P2", " info@cafe.com ")]);
        assert_eq!(keys(&outcome), vec![("P1", "Info@Cafe.com")]);
    }

    #[test]
    fn test_email_phase_only_sees_place_survivors() {
        // The second P1 is gone after phase 1, so its email cannot shadow P2.
        let outcome = deduplicate(vec![
            lead("P1", "first@x.com"),
            lead("P1", "shared@x.com"),
            lead("P2", "shared@x.com"),
        ]);
        assert_eq!(
            keys(&outcome),
            vec![("P1", "first@x.com"), ("P2", "shared@x.com")]
        );
        assert_eq!(outcome.dropped_by_place_id, 1);
        assert_eq!(outcome.dropped_by_email, 0);
    }

    #[test]
    fn test_email_drop_still_claims_place_id() {
        // P2 survives phase 1 and registers its id before phase 2 drops it.
        let outcome = deduplicate(vec![
            lead("P1", "a@x.com"),
            lead("P2", "a@x.com"),
            lead("P2", ""),
        ]);
        assert_eq!(keys(&outcome), vec![("P1", "a@x.com")]);
        assert_eq!(outcome.dropped_by_place_id, 1);
        assert_eq!(outcome.dropped_by_email, 1);
    }

    #[test]
    fn test_output_has_unique_keys() {
        let input = vec![
            lead("P1", "a@x.com"),
            lead("P2", "b@x.com"),
            lead("P1", "c@x.com"),
            lead("", "b@x.com"),
            lead("P3", ""),
            lead("", ""),
            lead("P3", "d@x.com"),
            lead("P4", "A@X.COM"),
        ];
        let outcome = deduplicate(input);

        let mut places = HashSet::new();
        let mut emails = HashSet::new();
        for record in &outcome.records {
            if let Some(key) = record.place_key() {
                assert!(places.insert(key.to_string()));
            }
            if let Some(key) = record.email_key() {
                assert!(emails.insert(key));
            }
        }
        assert_eq!(
            keys(&outcome),
            vec![("P1", "a@x.com"), ("P2", "b@x.com"), ("P3", ""), ("", "")]
        );
    }

    #[test]
    fn test_deterministic_digest() {
        let input = vec![lead("P1", "a@x.com"), lead("P1", "b@y.com"), lead("", "")];
        let first = deduplicate(input.clone());
        let second = deduplicate(input);

        assert_eq!(first.records, second.records);
        assert_eq!(first.digest(), second.digest());
        assert_eq!(first.digest().len(), 64);
    }

    #[test]
    fn test_digest_separates_fields() {
        let mut a = lead("P1", "");
        a.business_name = "x\x1fy".to_string();
        let mut b = lead("P1", "");
        b.business_name = "x".to_string();
        b.address = "y".to_string();

        let a = deduplicate(vec![a]);
        let b = deduplicate(vec![b]);
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn test_digest_depends_on_order() {
        let a = deduplicate(vec![lead("P1", ""), lead("P2", "")]);
        let b = deduplicate(vec![lead("P2", ""), lead("P1", "")]);
        assert_ne!(a.digest(), b.digest());
    }
}
