//! Linear trend fit and forward extrapolation.
//!
//! Ordinary least squares of close against the integer index 0..N-1,
//! reduced to the univariate closed form.

use crate::domain::error::AssetlabError;
use crate::domain::series::PricePoint;
use chrono::Duration;

#[derive(Debug, Clone)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendFit {
    pub fn value_at(&self, index: usize) -> f64 {
        self.intercept + self.slope * index as f64
    }
}

#[derive(Debug, Clone)]
pub struct ForecastResult {
    pub fit: TrendFit,
    /// Fitted line at each observed date.
    pub trend: Vec<PricePoint>,
    /// Fitted line extended past the last observation, one calendar day
    /// per step.
    pub future: Vec<PricePoint>,
}

/// Fit a straight line to the close path and extend it `forecast_days`
/// steps forward.
pub fn forecast_trend(
    prices: &[PricePoint],
    forecast_days: usize,
) -> Result<ForecastResult, AssetlabError> {
    if forecast_days == 0 {
        return Err(AssetlabError::InvalidParameters {
            reason: "forecast_days must be positive".into(),
        });
    }
    // The slope of a single point is undefined.
    if prices.len() < 2 {
        return Err(AssetlabError::InsufficientData {
            have: prices.len(),
            need: 2,
        });
    }

    let fit = fit_line(prices);

    let trend: Vec<PricePoint> = prices
        .iter()
        .enumerate()
        .map(|(i, p)| PricePoint {
            date: p.date,
            close: fit.value_at(i),
        })
        .collect();

    let last_date = prices[prices.len() - 1].date;
    let future: Vec<PricePoint> = (1..=forecast_days)
        .map(|step| PricePoint {
            date: last_date + Duration::days(step as i64),
            close: fit.value_at(prices.len() - 1 + step),
        })
        .collect();

    Ok(ForecastResult { fit, trend, future })
}

fn fit_line(prices: &[PricePoint]) -> TrendFit {
    let n = prices.len() as f64;
    let x_mean = (prices.len() - 1) as f64 / 2.0;
    let y_mean = prices.iter().map(|p| p.close).sum::<f64>() / n;

    let mut num = 0.0;
    let mut den = 0.0;
    for (i, point) in prices.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (point.close - y_mean);
        den += dx * dx;
    }

    let slope = num / den;
    TrendFit {
        slope,
        intercept: y_mean - slope * x_mean,
    }
}
