//! Price and return series value types.

use chrono::NaiveDate;

/// One daily close observation.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// One simple return between two consecutive closes.
///
/// Aligned to the date of the later of the two closes it was derived
/// from.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub value: f64,
}
