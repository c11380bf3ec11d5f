//! Rolling simple moving average with explicit warmup.
//!
//! O(n) sliding window sum. SMA(n)[i] = (P[i-n+1] + ... + P[i]) / n.
//! Warmup: first (n-1) points are invalid.

use crate::domain::series::PricePoint;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct SmaPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct SmaSeries {
    pub window: usize,
    pub values: Vec<SmaPoint>,
}

impl SmaSeries {
    /// The average at position `i`, or `None` while still warming up.
    pub fn at(&self, i: usize) -> Option<f64> {
        self.values.get(i).filter(|p| p.valid).map(|p| p.value)
    }
}

pub fn calc_sma(prices: &[PricePoint], window: usize) -> SmaSeries {
    if window == 0 || prices.is_empty() {
        return SmaSeries {
            window,
            values: Vec::new(),
        };
    }

    let mut values = Vec::with_capacity(prices.len());
    let mut window_sum: f64 = 0.0;

    for (i, point) in prices.iter().enumerate() {
        window_sum += point.close;
        if i >= window {
            window_sum -= prices[i - window].close;
        }

        let valid = i >= window - 1;
        let sma = if valid { window_sum / window as f64 } else { 0.0 };

        values.push(SmaPoint {
            date: point.date,
            valid,
            value: sma,
        });
    }

    SmaSeries { window, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_prices(closes: &[f64]) -> Vec<PricePoint> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                close,
            })
            .collect()
    }

    #[test]
    fn sma_warmup() {
        let prices = make_prices(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let series = calc_sma(&prices, 3);

        assert!(!series.values[0].valid);
        assert!(!series.values[1].valid);
        assert!(series.values[2].valid);
        assert!(series.values[3].valid);
        assert!(series.values[4].valid);
    }

    #[test]
    fn sma_window_1_is_identity() {
        let prices = make_prices(&[10.0, 20.0, 30.0]);
        let series = calc_sma(&prices, 1);

        assert_eq!(series.at(0), Some(10.0));
        assert_eq!(series.at(1), Some(20.0));
        assert_eq!(series.at(2), Some(30.0));
    }

    #[test]
    fn sma_sliding_values() {
        let prices = make_prices(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let series = calc_sma(&prices, 3);

        assert_relative_eq!(series.at(2).unwrap(), 20.0, epsilon = 1e-12);
        assert_relative_eq!(series.at(3).unwrap(), 30.0, epsilon = 1e-12);
        assert_relative_eq!(series.at(4).unwrap(), 40.0, epsilon = 1e-12);
    }

    #[test]
    fn sma_matches_direct_average() {
        let closes = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let prices = make_prices(&closes);
        let window = 4;
        let series = calc_sma(&prices, window);

        for i in (window - 1)..closes.len() {
            let direct: f64 =
                closes[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
            assert_relative_eq!(series.at(i).unwrap(), direct, epsilon = 1e-12);
        }
    }

    #[test]
    fn sma_warmup_reads_as_none() {
        let prices = make_prices(&[10.0, 20.0, 30.0]);
        let series = calc_sma(&prices, 3);

        assert_eq!(series.at(0), None);
        assert_eq!(series.at(1), None);
        assert!(series.at(2).is_some());
        assert_eq!(series.at(99), None);
    }

    #[test]
    fn sma_empty_prices() {
        let series = calc_sma(&[], 3);
        assert!(series.values.is_empty());
    }

    #[test]
    fn sma_window_0() {
        let prices = make_prices(&[10.0, 20.0]);
        let series = calc_sma(&prices, 0);
        assert!(series.values.is_empty());
    }

    #[test]
    fn sma_window_longer_than_series_all_invalid() {
        let prices = make_prices(&[10.0, 20.0]);
        let series = calc_sma(&prices, 5);

        assert_eq!(series.values.len(), 2);
        assert!(series.values.iter().all(|p| !p.valid));
    }
}
