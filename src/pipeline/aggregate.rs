//! Aggregation - per-group mean and median of price per area

use crate::pipeline::types::{AggregateRow, JoinedListing, OfferType, PropertyType};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Grouping key. Region membership is case-insensitive, so the key holds a
/// case-folded label; the display form is produced at output time. The
/// `BTreeMap` ordering of this key is the output contract: year ascending,
/// region ascending with nulls first, then offer and property type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupKey {
    year: Option<i32>,
    region: Option<String>,
    offer_type: OfferType,
    property_type: PropertyType,
}

/// Accumulates surviving rows into (year, region, offer, property) groups.
///
/// Each group buffers its full value vector: the median needs the sorted
/// distribution, so this is the one stage whose memory grows with group
/// size.
#[derive(Debug, Default)]
pub struct Aggregator {
    groups: BTreeMap<GroupKey, Vec<Decimal>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one filtered row. Rows reach this point only after the filter
    /// chain, which guarantees an offer type and a price per area.
    pub fn push(&mut self, listing: &JoinedListing) {
        let (Some(offer_type), Some(price_per_area)) =
            (listing.offer_type, listing.price_per_area)
        else {
            return;
        };

        let key = GroupKey {
            year: listing.year,
            region: listing.region.as_deref().map(str::to_lowercase),
            offer_type,
            property_type: listing.property_type,
        };

        self.groups.entry(key).or_default().push(price_per_area);
    }

    /// Finish the run: compute per-group statistics in output order.
    pub fn finish(self) -> Vec<AggregateRow> {
        self.groups
            .into_iter()
            .map(|(key, mut values)| {
                values.sort();
                let row_count = values.len();
                let sum: Decimal = values.iter().copied().sum();
                let mean = sum / Decimal::from(row_count as u64);

                AggregateRow {
                    year: key.year,
                    region: key.region.map(|r| r.to_uppercase()),
                    offer_type: key.offer_type,
                    property_type: key.property_type,
                    mean_price_per_area: mean,
                    median_price_per_area: median_of_sorted(&values),
                    row_count,
                }
            })
            .collect()
    }
}

fn median_of_sorted(values: &[Decimal]) -> Decimal {
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / Decimal::from(2)
    }
}
