//! Core data types for the cleaning pipeline
//! Pure data structures with no behavior

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Offer kinds the statistics are computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferType {
    Rent,
    Sale,
}

impl OfferType {
    /// Classify a raw source value. Anything unrecognized (auctions, shares,
    /// free-text garbage) maps to `None` and is dropped by the filter chain.
    pub fn parse(raw: &str) -> Option<OfferType> {
        match raw.trim().to_lowercase().as_str() {
            "rent" | "rental" | "lease" => Some(OfferType::Rent),
            "sale" | "sell" => Some(OfferType::Sale),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OfferType::Rent => "rent",
            OfferType::Sale => "sale",
        }
    }
}

impl std::fmt::Display for OfferType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Property types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    House,
    Other,
}

impl PropertyType {
    pub fn parse(raw: &str) -> PropertyType {
        match raw.trim().to_lowercase().as_str() {
            "apartment" | "flat" => PropertyType::Apartment,
            "house" => PropertyType::House,
            _ => PropertyType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Other => "other",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw listing row as it arrives from the source table.
///
/// Numeric and date fields stay as text here: sources deliver empty strings
/// and junk values, and coercion is the normalizer's job.
#[derive(Debug, Clone)]
pub struct Listing {
    pub id: String,
    pub created_at: Option<String>,
    pub offer_type: Option<OfferType>,
    pub property_type: PropertyType,
    pub price_total: Option<String>,
    pub living_area: Option<String>,
    pub district: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// Listing after field normalization: coerced numerics, extracted year,
/// exception-mapped district and its join key.
#[derive(Debug, Clone)]
pub struct NormalizedListing {
    pub id: String,
    pub year: Option<i32>,
    pub offer_type: Option<OfferType>,
    pub property_type: PropertyType,
    pub price_total: Option<Decimal>,
    pub living_area: Option<Decimal>,
    pub district_raw: Option<String>,
    pub district_key: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
}

/// Listing after the region join.
///
/// `district` holds the canonical label when the lookup matched, otherwise
/// the raw (exception-mapped) text. `region` stays `None` for unmatched
/// rows; later filtering decides their fate.
#[derive(Debug, Clone)]
pub struct JoinedListing {
    pub id: String,
    pub year: Option<i32>,
    pub offer_type: Option<OfferType>,
    pub property_type: PropertyType,
    pub price_total: Option<Decimal>,
    pub living_area: Option<Decimal>,
    pub district: Option<String>,
    pub region: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub price_per_area: Option<Decimal>,
}

/// One output group of the aggregation stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub year: Option<i32>,
    pub region: Option<String>,
    pub offer_type: OfferType,
    pub property_type: PropertyType,
    pub mean_price_per_area: Decimal,
    pub median_price_per_area: Decimal,
    pub row_count: usize,
}

/// Row counts at each stage boundary, for run auditability
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StageMetrics {
    pub rows_in: usize,
    pub duplicates_dropped: usize,
    pub regions_unmatched: usize,
    pub rows_filtered_out: usize,
    pub rows_aggregated: usize,
    pub groups: usize,
}

impl std::fmt::Display for StageMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rows in: {}, duplicates dropped: {}, regions unmatched: {}, filtered out: {}, aggregated: {}, groups: {}",
            self.rows_in,
            self.duplicates_dropped,
            self.regions_unmatched,
            self.rows_filtered_out,
            self.rows_aggregated,
            self.groups
        )
    }
}
