//! Normalization functions - derive cleaned fields from raw listing values
//!
//! Every step here is total: a value that cannot be coerced degrades to
//! `None` and the row stays in the pipeline until a predicate needs the
//! missing field.

use crate::pipeline::types::{Listing, NormalizedListing};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Fixed district renames, checked by case-insensitive equality on the
/// trimmed value before key normalization. A two-entry table on purpose:
/// extend by adding entries, never by inferring a pattern.
const DISTRICT_EXCEPTIONS: [(&str, &str); 2] = [
    ("hlavní město praha", "Praha"),
    ("ostrava", "Ostrava-město"),
];

/// Normalize one deduplicated listing.
pub fn normalize(listing: Listing) -> NormalizedListing {
    let year = extract_year(listing.created_at.as_deref());
    let district_raw = listing.district.as_deref().map(apply_district_exceptions);
    let district_key = district_raw
        .as_deref()
        .map(district_key)
        .filter(|key| !key.is_empty());

    NormalizedListing {
        id: listing.id,
        year,
        offer_type: listing.offer_type,
        property_type: listing.property_type,
        price_total: coerce_decimal(listing.price_total.as_deref()),
        living_area: coerce_decimal(listing.living_area.as_deref()),
        latitude: coerce_decimal(listing.latitude.as_deref()),
        longitude: coerce_decimal(listing.longitude.as_deref()),
        district_raw,
        district_key,
    }
}

/// Extract the year from a creation timestamp string.
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD`.
pub fn extract_year(raw: Option<&str>) -> Option<i32> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.year());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.year());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.year());
    }

    None
}

/// Apply the fixed district renames; anything else passes through unchanged.
pub fn apply_district_exceptions(raw: &str) -> String {
    let folded = raw.trim().to_lowercase();
    for (source, replacement) in DISTRICT_EXCEPTIONS {
        if folded == source {
            return replacement.to_string();
        }
    }
    raw.to_string()
}

/// Build the join key for a district name: trim, collapse whitespace runs
/// around hyphens into a bare hyphen, collapse remaining whitespace runs to
/// a single space, lowercase. Idempotent.
pub fn district_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut whitespace_run = false;

    for ch in raw.trim().chars() {
        if ch.is_whitespace() {
            whitespace_run = true;
            continue;
        }
        if ch == '-' {
            // hyphen absorbs whitespace on both sides
            whitespace_run = false;
            key.push('-');
        } else {
            if whitespace_run && !key.is_empty() && !key.ends_with('-') {
                key.push(' ');
            }
            whitespace_run = false;
            key.extend(ch.to_lowercase());
        }
    }

    key
}

/// Coerce a raw string to a decimal. Empty strings and the literal `"."`
/// behave like missing values; any other unparseable text yields `None`.
pub fn coerce_decimal(raw: Option<&str>) -> Option<Decimal> {
    let raw = raw?.trim();
    if raw.is_empty() || raw == "." {
        return None;
    }
    raw.parse::<Decimal>().ok()
}
