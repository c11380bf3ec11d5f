//! Moving-average crossover strategy engine.
//!
//! Builds a {0,1} position signal from a short/long SMA pair, applies the
//! signal to asset returns with a one-period shift, and reports the
//! resulting equity curve and metrics.

use crate::domain::backtest::backtest_buy_and_hold;
use crate::domain::error::AssetlabError;
use crate::domain::metrics::{compute_metrics, MetricsReport};
use crate::domain::returns::compute_returns;
use crate::domain::series::{PricePoint, ReturnPoint};
use crate::domain::sma::{calc_sma, SmaSeries};

/// Which path the strategy-level max drawdown is measured on.
///
/// Both choices exist in the wild; the caller picks one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawdownBasis {
    /// Underlying asset closes, restricted to the strategy's timeline.
    AssetPrice,
    /// The strategy's own equity curve.
    StrategyEquity,
}

impl DrawdownBasis {
    pub fn from_config_value(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "asset_price" | "asset" => Some(DrawdownBasis::AssetPrice),
            "strategy_equity" | "equity" => Some(DrawdownBasis::StrategyEquity),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StrategyParameters {
    pub short_window: usize,
    pub long_window: usize,
    pub initial_capital: f64,
    pub drawdown_basis: DrawdownBasis,
}

#[derive(Debug, Clone)]
pub struct StrategyOutcome {
    pub portfolio: Vec<f64>,
    pub metrics: MetricsReport,
    pub positions: Vec<u8>,
    pub short_ma: SmaSeries,
    pub long_ma: SmaSeries,
}

/// Run the crossover strategy over a price series.
///
/// The position applied to the return at time t is the signal computed at
/// t-1; the first tradable day is always flat. Same inputs, same outputs —
/// there is no state between calls.
pub fn run_crossover(
    prices: &[PricePoint],
    params: &StrategyParameters,
) -> Result<StrategyOutcome, AssetlabError> {
    validate_parameters(params)?;

    if prices.len() < params.long_window {
        return Err(AssetlabError::InsufficientData {
            have: prices.len(),
            need: params.long_window,
        });
    }

    let returns = compute_returns(prices);
    let short_ma = calc_sma(prices, params.short_window);
    let long_ma = calc_sma(prices, params.long_window);

    // Return k sits at price index k+1, so the shifted signal for it is
    // the one computed at price index k.
    let positions: Vec<u8> = (0..returns.len())
        .map(|k| signal_at(&short_ma, &long_ma, k))
        .collect();

    let strategy_returns: Vec<ReturnPoint> = returns
        .iter()
        .zip(&positions)
        .map(|(r, &position)| ReturnPoint {
            date: r.date,
            value: r.value * position as f64,
        })
        .collect();

    let portfolio = backtest_buy_and_hold(&strategy_returns, params.initial_capital)?;

    let drawdown_path: Vec<PricePoint> = match params.drawdown_basis {
        DrawdownBasis::AssetPrice => prices[1..].to_vec(),
        DrawdownBasis::StrategyEquity => strategy_returns
            .iter()
            .zip(&portfolio)
            .map(|(r, &equity)| PricePoint {
                date: r.date,
                close: equity,
            })
            .collect(),
    };
    let metrics = compute_metrics(&strategy_returns, &drawdown_path);

    Ok(StrategyOutcome {
        portfolio,
        metrics,
        positions,
        short_ma,
        long_ma,
    })
}

fn validate_parameters(params: &StrategyParameters) -> Result<(), AssetlabError> {
    if params.short_window == 0 || params.long_window == 0 {
        return Err(AssetlabError::InvalidParameters {
            reason: "moving average windows must be positive".into(),
        });
    }
    if params.short_window >= params.long_window {
        return Err(AssetlabError::InvalidParameters {
            reason: format!(
                "short_window ({}) must be less than long_window ({})",
                params.short_window, params.long_window
            ),
        });
    }
    if params.initial_capital <= 0.0 {
        return Err(AssetlabError::InvalidParameters {
            reason: format!(
                "initial_capital must be positive, got {}",
                params.initial_capital
            ),
        });
    }
    Ok(())
}

fn signal_at(short_ma: &SmaSeries, long_ma: &SmaSeries, index: usize) -> u8 {
    match (short_ma.at(index), long_ma.at(index)) {
        (Some(short), Some(long)) if short > long => 1,
        _ => 0,
    }
}
