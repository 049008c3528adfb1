// Library module for testable functions

pub mod pipeline;

use rust_decimal::Decimal;

/// Calculate price per square meter
/// Formula: price_total / living_area; a non-positive area yields None
pub fn price_per_sqm(price_total: Decimal, living_area: Decimal) -> Option<Decimal> {
    if living_area <= Decimal::ZERO {
        return None;
    }
    Some(price_total / living_area)
}
