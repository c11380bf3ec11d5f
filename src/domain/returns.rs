//! Simple-return calculation over a close-price path.

use crate::domain::series::{PricePoint, ReturnPoint};

/// Pointwise percentage change between consecutive closes.
///
/// The first price point has no predecessor and is dropped; the result is
/// one shorter than the input and empty for inputs of fewer than 2 points.
pub fn compute_returns(prices: &[PricePoint]) -> Vec<ReturnPoint> {
    prices
        .windows(2)
        .map(|w| ReturnPoint {
            date: w[1].date,
            value: w[1].close / w[0].close - 1.0,
        })
        .collect()
}
