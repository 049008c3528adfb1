//! Region reference lookup and the district -> region join

use crate::pipeline::normalize::district_key;
use crate::pipeline::types::{JoinedListing, NormalizedListing};
use std::collections::HashMap;
use tracing::warn;

/// Canonical district label and its administrative region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionEntry {
    pub district: String,
    pub region: String,
}

/// Immutable district -> region reference, keyed by the same normalized
/// form the normalizer produces for listings. Built once per run and probed
/// for every row.
#[derive(Debug, Default)]
pub struct RegionLookup {
    map: HashMap<String, RegionEntry>,
}

impl RegionLookup {
    /// Build the lookup from (district, region) pairs. Keys go through the
    /// identical normalization applied to listing districts, so the join is
    /// plain string equality. A repeated district keeps the last entry.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = HashMap::new();
        for (district, region) in entries {
            let key = district_key(&district);
            if key.is_empty() {
                warn!("Skipping region entry with blank district (region: {})", region);
                continue;
            }
            if let Some(previous) = map.insert(key, RegionEntry { district, region }) {
                warn!("Duplicate district in region reference: {}", previous.district);
            }
        }
        Self { map }
    }

    pub fn resolve(&self, key: &str) -> Option<&RegionEntry> {
        self.map.get(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Left-join a normalized listing against the region reference and derive
/// price per area. Unmatched districts keep a null region; the division is
/// null whenever an operand is missing or the area is zero.
pub fn resolve_region(listing: NormalizedListing, lookup: &RegionLookup) -> JoinedListing {
    let entry = listing.district_key.as_deref().and_then(|key| lookup.resolve(key));

    let price_per_area = match (listing.price_total, listing.living_area) {
        (Some(price), Some(area)) => crate::price_per_sqm(price, area),
        _ => None,
    };

    JoinedListing {
        id: listing.id,
        year: listing.year,
        offer_type: listing.offer_type,
        property_type: listing.property_type,
        price_total: listing.price_total,
        living_area: listing.living_area,
        district: entry
            .map(|e| e.district.clone())
            .or(listing.district_raw),
        region: entry.map(|e| e.region.clone()),
        latitude: listing.latitude,
        longitude: listing.longitude,
        price_per_area,
    }
}
