//! Per-ticker metric report assembly.
//!
//! Parses ticker lists from configuration and builds one report row per
//! ticker. A ticker that fails still yields a row carrying the error
//! message; one bad asset never aborts the batch.

use crate::domain::error::AssetlabError;
use crate::domain::metrics::{compute_metrics, MetricsReport};
use crate::domain::returns::compute_returns;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::collections::HashSet;

#[derive(Debug, Clone, thiserror::Error)]
pub enum TickerListError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

/// Parse a comma-separated ticker list: trimmed, uppercased, duplicates
/// rejected.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, TickerListError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(TickerListError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if seen.contains(&ticker) {
            return Err(TickerListError::DuplicateTicker(ticker));
        }
        seen.insert(ticker.clone());
        tickers.push(ticker);
    }

    Ok(tickers)
}

#[derive(Debug, Clone)]
pub struct ReportRow {
    pub ticker: String,
    pub metrics: Option<MetricsReport>,
    pub error: Option<String>,
}

/// Compute metrics for each ticker over the given window, one row per
/// ticker in input order.
pub fn build_report_rows(
    data_port: &dyn DataPort,
    tickers: &[String],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Vec<ReportRow> {
    tickers
        .iter()
        .map(|ticker| match ticker_metrics(data_port, ticker, start_date, end_date) {
            Ok(metrics) => ReportRow {
                ticker: ticker.clone(),
                metrics: Some(metrics),
                error: None,
            },
            Err(e) => ReportRow {
                ticker: ticker.clone(),
                metrics: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

fn ticker_metrics(
    data_port: &dyn DataPort,
    ticker: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<MetricsReport, AssetlabError> {
    let prices = data_port.fetch_prices(ticker, start_date, end_date)?;
    if prices.is_empty() {
        return Err(AssetlabError::NoData {
            ticker: ticker.to_string(),
        });
    }

    let returns = compute_returns(&prices);
    Ok(compute_metrics(&returns, &prices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_ticker() {
        assert_eq!(parse_tickers("BTC-USD").unwrap(), vec!["BTC-USD"]);
    }

    #[test]
    fn parse_list_trims_and_uppercases() {
        assert_eq!(
            parse_tickers(" btc-usd , aapl,MSFT ").unwrap(),
            vec!["BTC-USD", "AAPL", "MSFT"]
        );
    }

    #[test]
    fn parse_rejects_empty_token() {
        assert!(matches!(
            parse_tickers("AAPL,,MSFT"),
            Err(TickerListError::EmptyToken)
        ));
    }

    #[test]
    fn parse_rejects_duplicates() {
        assert!(matches!(
            parse_tickers("AAPL,aapl"),
            Err(TickerListError::DuplicateTicker(_))
        ));
    }
}
