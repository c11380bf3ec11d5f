//! Performance metrics over a return series and its aligned price path.

use crate::domain::series::{PricePoint, ReturnPoint};
use std::fmt;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// A metric that may have no meaningful value.
///
/// Ratio metrics lose meaning when their denominator degenerates (zero
/// volatility, sub-2-point input). `Undefined` is the only representation
/// of that state; NaN and 0.0 sentinels never leave this module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Defined(f64),
    Undefined,
}

impl MetricValue {
    pub fn is_defined(&self) -> bool {
        matches!(self, MetricValue::Defined(_))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            MetricValue::Defined(v) => Some(*v),
            MetricValue::Undefined => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Defined(v) => write!(f, "{:.6}", v),
            MetricValue::Undefined => write!(f, "n/a"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsReport {
    pub cumulative_return: f64,
    pub vol_daily: MetricValue,
    pub sharpe: MetricValue,
    pub max_drawdown: f64,
}

/// Compute the four headline metrics from a return series and the price
/// path it was derived from.
///
/// `prices` must be the path that produced `returns` (or the equity curve
/// standing in for it); drawdown runs over `prices` on its own timeline.
pub fn compute_metrics(returns: &[ReturnPoint], prices: &[PricePoint]) -> MetricsReport {
    let cumulative_return = returns.iter().fold(1.0, |acc, r| acc * (1.0 + r.value)) - 1.0;

    let vol_daily = sample_stddev(returns);

    let sharpe = match vol_daily {
        MetricValue::Defined(vol) if vol != 0.0 => {
            let mean = returns.iter().map(|r| r.value).sum::<f64>() / returns.len() as f64;
            MetricValue::Defined(mean / vol * TRADING_DAYS_PER_YEAR.sqrt())
        }
        _ => MetricValue::Undefined,
    };

    MetricsReport {
        cumulative_return,
        vol_daily,
        sharpe,
        max_drawdown: compute_drawdown(prices),
    }
}

/// Unbiased (N−1) standard deviation; undefined below 2 observations.
fn sample_stddev(returns: &[ReturnPoint]) -> MetricValue {
    if returns.len() < 2 {
        return MetricValue::Undefined;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().map(|r| r.value).sum::<f64>() / n;
    let variance = returns
        .iter()
        .map(|r| (r.value - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);

    MetricValue::Defined(variance.sqrt())
}

/// Minimum over time of `close[t] / running_max(close[0..=t]) - 1`.
///
/// Always <= 0; exactly 0 for an empty or non-decreasing path.
pub fn compute_drawdown(prices: &[PricePoint]) -> f64 {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0_f64;

    for point in prices {
        if point.close > peak {
            peak = point.close;
        }
        let dd = point.close / peak - 1.0;
        if dd < max_dd {
            max_dd = dd;
        }
    }

    max_dd
}
