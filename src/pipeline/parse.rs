//! Parse functions - materialize listings and reference data from CSV

use crate::pipeline::regions::RegionLookup;
use crate::pipeline::types::{Listing, OfferType, PropertyType};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Listings CSV row structure
#[derive(Debug, Deserialize)]
struct ListingCsvRow {
    listing_id: String,
    created_at: Option<String>,
    offer_type: Option<String>,
    property_type: Option<String>,
    total_price: Option<String>,
    living_area: Option<String>,
    district: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
}

impl ListingCsvRow {
    fn into_listing(self) -> Listing {
        Listing {
            id: self.listing_id,
            created_at: self.created_at,
            offer_type: self.offer_type.as_deref().and_then(OfferType::parse),
            property_type: self
                .property_type
                .as_deref()
                .map(PropertyType::parse)
                .unwrap_or(PropertyType::Other),
            price_total: self.total_price,
            living_area: self.living_area,
            district: self.district,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Stream listings from a headered CSV file.
///
/// Rows that fail to deserialize are counted and skipped, never fatal; only
/// the first few are logged to keep noise down on large files.
pub fn read_listings(path: &Path) -> Result<impl Iterator<Item = Listing>> {
    info!("Reading listings from {:?}", path);

    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to open listings CSV {path:?}"))?;

    let mut parse_errors = 0usize;

    Ok(reader
        .into_deserialize::<ListingCsvRow>()
        .enumerate()
        .filter_map(move |(idx, result)| match result {
            Ok(row) => Some(row.into_listing()),
            Err(e) => {
                parse_errors += 1;
                if parse_errors <= 10 {
                    warn!("Failed to deserialize listing row {}: {}", idx, e);
                }
                None
            }
        }))
}

/// Region reference CSV row structure
#[derive(Debug, Deserialize)]
struct RegionCsvRow {
    district: String,
    region: String,
}

/// Load the district -> region reference table. The reference is small and
/// is held fully in memory for the whole run.
pub fn read_region_lookup(path: &Path) -> Result<RegionLookup> {
    info!("Reading region reference from {:?}", path);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to open region reference CSV {path:?}"))?;

    let mut entries = Vec::new();
    for (idx, result) in reader.deserialize::<RegionCsvRow>().enumerate() {
        let row: RegionCsvRow =
            result.with_context(|| format!("bad region reference row {idx}"))?;
        entries.push((row.district, row.region));
    }

    let lookup = RegionLookup::from_entries(entries);
    info!("Loaded {} districts into region lookup", lookup.len());

    Ok(lookup)
}
