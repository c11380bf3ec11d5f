//! Buy-and-hold compounding backtest.

use crate::domain::error::AssetlabError;
use crate::domain::series::ReturnPoint;

pub const DEFAULT_INITIAL_CAPITAL: f64 = 100.0;

/// Compound `initial_capital` through a return series.
///
/// `equity[t] = initial_capital * prod_{k<=t}(1 + r[k])`, one value per
/// return. No rebalancing, no costs, no leverage. A single-period loss of
/// 100% or more is rejected rather than compounded into non-positive
/// equity.
pub fn backtest_buy_and_hold(
    returns: &[ReturnPoint],
    initial_capital: f64,
) -> Result<Vec<f64>, AssetlabError> {
    if initial_capital <= 0.0 {
        return Err(AssetlabError::InvalidParameters {
            reason: format!("initial_capital must be positive, got {initial_capital}"),
        });
    }

    let mut equity = Vec::with_capacity(returns.len());
    let mut value = initial_capital;

    for (index, r) in returns.iter().enumerate() {
        if r.value <= -1.0 {
            return Err(AssetlabError::InvalidReturn {
                index,
                value: r.value,
            });
        }
        value *= 1.0 + r.value;
        equity.push(value);
    }

    Ok(equity)
}
