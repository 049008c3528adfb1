//! Validity filters - predicate chain applied to joined listings
//!
//! Predicates are independent and order-free; a row survives only if every
//! one of them holds. A predicate that touches a missing or uncoercible
//! field evaluates to false, it never errors.

use crate::pipeline::types::{JoinedListing, OfferType, PropertyType};
use rust_decimal::Decimal;
use thiserror::Error;

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: Decimal,
    pub max: Decimal,
}

impl Bounds {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: Decimal) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Malformed boundary constants are the only fatal error class, detected
/// before any row is processed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} bounds are inverted: min {min} exceeds max {max}")]
    InvertedBounds {
        name: &'static str,
        min: Decimal,
        max: Decimal,
    },
}

/// Numeric boundaries for the filter chain. All values are tunable; the
/// defaults carry the canonical constants for the Czech dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub living_area: Bounds,
    pub latitude: Bounds,
    pub longitude: Bounds,
    pub rent_price_per_sqm: Bounds,
    pub sale_price_per_sqm: Bounds,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            living_area: Bounds::new(Decimal::from(16), Decimal::from(500)),
            // rough bounding box of the country
            latitude: Bounds::new(Decimal::new(485, 1), Decimal::new(511, 1)),
            longitude: Bounds::new(Decimal::new(120, 1), Decimal::new(189, 1)),
            rent_price_per_sqm: Bounds::new(Decimal::from(50), Decimal::from(1_500)),
            sale_price_per_sqm: Bounds::new(Decimal::from(5_000), Decimal::from(300_000)),
        }
    }
}

impl FilterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, bounds) in [
            ("living_area", self.living_area),
            ("latitude", self.latitude),
            ("longitude", self.longitude),
            ("rent_price_per_sqm", self.rent_price_per_sqm),
            ("sale_price_per_sqm", self.sale_price_per_sqm),
        ] {
            if bounds.min > bounds.max {
                return Err(ConfigError::InvertedBounds {
                    name,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }
        Ok(())
    }
}

/// Evaluate the full predicate chain.
pub fn passes_filters(listing: &JoinedListing, config: &FilterConfig) -> bool {
    is_residential(listing)
        && has_known_offer(listing)
        && area_in_bounds(listing, config)
        && has_positive_price(listing)
        && has_location(listing)
        && coordinates_in_bounds(listing, config)
        && district_is_not_code(listing)
        && price_per_area_in_bounds(listing, config)
}

fn is_residential(listing: &JoinedListing) -> bool {
    matches!(
        listing.property_type,
        PropertyType::Apartment | PropertyType::House
    )
}

fn has_known_offer(listing: &JoinedListing) -> bool {
    listing.offer_type.is_some()
}

fn area_in_bounds(listing: &JoinedListing, config: &FilterConfig) -> bool {
    listing
        .living_area
        .map_or(false, |area| config.living_area.contains(area))
}

fn has_positive_price(listing: &JoinedListing) -> bool {
    listing.price_total.map_or(false, |price| price > Decimal::ZERO)
}

/// A row must be placeable: either both coordinates or a non-blank district.
fn has_location(listing: &JoinedListing) -> bool {
    let has_coordinates = listing.latitude.is_some() && listing.longitude.is_some();
    let has_district = listing
        .district
        .as_deref()
        .map_or(false, |d| !d.trim().is_empty());
    has_coordinates || has_district
}

/// When both coordinates are present they must fall inside the bounding
/// box; a row carrying only a district passes vacuously.
fn coordinates_in_bounds(listing: &JoinedListing, config: &FilterConfig) -> bool {
    match (listing.latitude, listing.longitude) {
        (Some(lat), Some(lon)) => {
            config.latitude.contains(lat) && config.longitude.contains(lon)
        }
        _ => true,
    }
}

/// Guards against numeric codes leaking into the district text field.
fn district_is_not_code(listing: &JoinedListing) -> bool {
    match listing.district.as_deref().map(str::trim) {
        Some(district) if !district.is_empty() => {
            !district.chars().all(|c| c.is_ascii_digit())
        }
        _ => true,
    }
}

fn price_per_area_in_bounds(listing: &JoinedListing, config: &FilterConfig) -> bool {
    let (Some(offer), Some(price_per_area)) = (listing.offer_type, listing.price_per_area)
    else {
        return false;
    };

    match offer {
        OfferType::Rent => config.rent_price_per_sqm.contains(price_per_area),
        OfferType::Sale => config.sale_price_per_sqm.contains(price_per_area),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(raw: &str) -> Decimal {
        raw.parse().unwrap()
    }

    /// A listing that passes every predicate with the default config.
    fn valid_listing() -> JoinedListing {
        JoinedListing {
            id: "l-1".to_string(),
            year: Some(2023),
            offer_type: Some(OfferType::Sale),
            property_type: PropertyType::Apartment,
            price_total: Some(Decimal::from(3_000_000)),
            living_area: Some(Decimal::from(60)),
            district: Some("Praha".to_string()),
            region: Some("Hlavní město Praha".to_string()),
            latitude: Some(dec("50.08")),
            longitude: Some(dec("14.43")),
            price_per_area: Some(Decimal::from(50_000)),
        }
    }

    fn with_price_per_area(offer: OfferType, price_per_area: &str) -> JoinedListing {
        JoinedListing {
            offer_type: Some(offer),
            price_per_area: Some(dec(price_per_area)),
            ..valid_listing()
        }
    }

    #[test]
    fn test_valid_listing_passes() {
        assert!(passes_filters(&valid_listing(), &FilterConfig::default()));
    }

    #[test]
    fn test_property_type_gate() {
        let config = FilterConfig::default();
        let mut listing = valid_listing();

        listing.property_type = PropertyType::House;
        assert!(passes_filters(&listing, &config));

        listing.property_type = PropertyType::Other;
        assert!(!passes_filters(&listing, &config));
    }

    #[test]
    fn test_unknown_offer_type_is_excluded() {
        let mut listing = valid_listing();
        listing.offer_type = None;
        assert!(!passes_filters(&listing, &FilterConfig::default()));
    }

    #[test]
    fn test_living_area_boundaries() {
        let config = FilterConfig::default();

        for (raw, expected) in [("15.999", false), ("16", true), ("500", true), ("500.001", false)] {
            let mut listing = valid_listing();
            listing.living_area = Some(dec(raw));
            // keep price_per_area inside the sale range, area is what is under test
            listing.price_per_area = Some(Decimal::from(50_000));
            assert_eq!(
                passes_filters(&listing, &config),
                expected,
                "living_area = {raw}"
            );
        }

        let mut listing = valid_listing();
        listing.living_area = None;
        assert!(!passes_filters(&listing, &config));
    }

    #[test]
    fn test_price_must_be_positive() {
        let config = FilterConfig::default();
        let mut listing = valid_listing();

        listing.price_total = Some(Decimal::ZERO);
        assert!(!passes_filters(&listing, &config));

        listing.price_total = None;
        assert!(!passes_filters(&listing, &config));
    }

    #[test]
    fn test_location_requires_coordinates_or_district() {
        let config = FilterConfig::default();

        let mut listing = valid_listing();
        listing.district = None;
        assert!(passes_filters(&listing, &config), "coordinates alone suffice");

        let mut listing = valid_listing();
        listing.latitude = None;
        listing.longitude = None;
        assert!(passes_filters(&listing, &config), "district alone suffices");

        let mut listing = valid_listing();
        listing.latitude = None;
        listing.longitude = None;
        listing.district = Some("  ".to_string());
        assert!(!passes_filters(&listing, &config), "blank district is no location");
    }

    #[test]
    fn test_coordinate_bounding_box() {
        let config = FilterConfig::default();

        let mut listing = valid_listing();
        listing.latitude = Some(dec("47.9"));
        assert!(!passes_filters(&listing, &config));

        let mut listing = valid_listing();
        listing.longitude = Some(dec("19.2"));
        assert!(!passes_filters(&listing, &config));

        // a single missing coordinate leaves the box check vacuous
        let mut listing = valid_listing();
        listing.longitude = None;
        assert!(passes_filters(&listing, &config));

        let mut listing = valid_listing();
        listing.latitude = Some(dec("48.5"));
        listing.longitude = Some(dec("18.9"));
        assert!(passes_filters(&listing, &config), "box edges are inclusive");
    }

    #[test]
    fn test_all_digit_district_is_excluded() {
        let config = FilterConfig::default();

        let mut listing = valid_listing();
        listing.district = Some("53012".to_string());
        assert!(!passes_filters(&listing, &config));

        let mut listing = valid_listing();
        listing.district = Some("Praha 5".to_string());
        assert!(passes_filters(&listing, &config));
    }

    #[test]
    fn test_rent_price_per_sqm_boundaries() {
        let config = FilterConfig::default();

        for (raw, expected) in [("49", false), ("50", true), ("1500", true), ("1501", false)] {
            let listing = with_price_per_area(OfferType::Rent, raw);
            assert_eq!(passes_filters(&listing, &config), expected, "rent ppsm = {raw}");
        }
    }

    #[test]
    fn test_sale_price_per_sqm_boundaries() {
        let config = FilterConfig::default();

        for (raw, expected) in [
            ("4999", false),
            ("5000", true),
            ("300000", true),
            ("300001", false),
        ] {
            let listing = with_price_per_area(OfferType::Sale, raw);
            assert_eq!(passes_filters(&listing, &config), expected, "sale ppsm = {raw}");
        }
    }

    #[test]
    fn test_missing_price_per_area_is_excluded() {
        let mut listing = valid_listing();
        listing.price_per_area = None;
        assert!(!passes_filters(&listing, &FilterConfig::default()));
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let mut config = FilterConfig::default();
        config.rent_price_per_sqm = Bounds::new(Decimal::from(1_500), Decimal::from(50));

        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedBounds {
                name: "rent_price_per_sqm",
                min: Decimal::from(1_500),
                max: Decimal::from(50),
            })
        );

        assert!(FilterConfig::default().validate().is_ok());
    }
}
