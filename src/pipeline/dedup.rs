//! Deduplication - collapse repeated listing identifiers to a single row

use crate::pipeline::types::Listing;
use std::collections::HashSet;

/// Tracks which listing identifiers have already been seen.
///
/// The surviving row per identifier is the first one encountered in input
/// order. The choice among duplicates is arbitrary but reproducible for a
/// stable input ordering; no recency or quality signal breaks the tie.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time an identifier is observed.
    pub fn keep(&mut self, listing: &Listing) -> bool {
        self.seen.insert(listing.id.clone())
    }
}

/// Convenience wrapper for callers holding a full batch in memory.
pub fn dedup_listings(listings: Vec<Listing>) -> Vec<Listing> {
    let mut dedup = Deduplicator::new();
    listings.into_iter().filter(|l| dedup.keep(l)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::PropertyType;

    fn listing(id: &str, district: &str) -> Listing {
        Listing {
            id: id.to_string(),
            created_at: None,
            offer_type: None,
            property_type: PropertyType::Other,
            price_total: None,
            living_area: None,
            district: Some(district.to_string()),
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn test_one_row_per_identifier() {
        let rows = vec![
            listing("a", "first"),
            listing("b", "only"),
            listing("a", "second"),
            listing("a", "third"),
        ];

        let deduped = dedup_listings(rows);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].id, "a");
        assert_eq!(deduped[1].id, "b");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let rows = vec![listing("a", "first"), listing("a", "second")];

        let deduped = dedup_listings(rows);

        assert_eq!(deduped[0].district.as_deref(), Some("first"));
    }

    #[test]
    fn test_reapplication_is_a_no_op() {
        let rows = vec![listing("a", "first"), listing("a", "second"), listing("b", "x")];

        let once = dedup_listings(rows);
        let twice = dedup_listings(once.clone());

        assert_eq!(once.len(), twice.len());
        let ids: Vec<&str> = twice.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_singletons_pass_through() {
        let rows = vec![listing("a", "x"), listing("b", "y")];

        assert_eq!(dedup_listings(rows).len(), 2);
    }
}
