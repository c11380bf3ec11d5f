//! Configuration validation.
//!
//! Validates config fields before any computation runs, so a bad INI file
//! fails with a section/key-specific message instead of a mid-pipeline
//! error.

use crate::domain::crossover::DrawdownBasis;
use crate::domain::error::AssetlabError;
use crate::domain::report::parse_tickers;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), AssetlabError> {
    validate_data_path(config)?;
    validate_dates(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), AssetlabError> {
    validate_windows(config)?;
    validate_initial_capital(config)?;
    validate_drawdown_basis(config)?;
    Ok(())
}

pub fn validate_forecast_config(config: &dyn ConfigPort) -> Result<(), AssetlabError> {
    let days = config.get_int("forecast", "days", 30);
    if days < 1 {
        return Err(AssetlabError::ConfigInvalid {
            section: "forecast".to_string(),
            key: "days".to_string(),
            reason: "days must be at least 1".to_string(),
        });
    }
    Ok(())
}

pub fn validate_report_config(config: &dyn ConfigPort) -> Result<(), AssetlabError> {
    let tickers = config.get_string("report", "tickers").ok_or_else(|| {
        AssetlabError::ConfigMissing {
            section: "report".to_string(),
            key: "tickers".to_string(),
        }
    })?;

    parse_tickers(&tickers).map_err(|e| AssetlabError::ConfigInvalid {
        section: "report".to_string(),
        key: "tickers".to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}

fn validate_data_path(config: &dyn ConfigPort) -> Result<(), AssetlabError> {
    match config.get_string("data", "path") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        Some(_) => Err(AssetlabError::ConfigInvalid {
            section: "data".to_string(),
            key: "path".to_string(),
            reason: "path must not be empty".to_string(),
        }),
        None => Err(AssetlabError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), AssetlabError> {
    let start_str = config.get_string("data", "start_date");
    let end_str = config.get_string("data", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if start_date >= end_date {
        return Err(AssetlabError::ConfigInvalid {
            section: "data".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }
    Ok(())
}

fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, AssetlabError> {
    match value {
        None => Err(AssetlabError::ConfigMissing {
            section: "data".to_string(),
            key: field.to_string(),
        }),
        Some(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AssetlabError::ConfigInvalid {
                section: "data".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            })
        }
    }
}

fn validate_windows(config: &dyn ConfigPort) -> Result<(), AssetlabError> {
    let short = config.get_int("strategy", "short_window", 20);
    let long = config.get_int("strategy", "long_window", 50);

    if short < 1 {
        return Err(AssetlabError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "short_window".to_string(),
            reason: "short_window must be positive".to_string(),
        });
    }
    if long < 1 {
        return Err(AssetlabError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "long_window".to_string(),
            reason: "long_window must be positive".to_string(),
        });
    }
    if short >= long {
        return Err(AssetlabError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "short_window".to_string(),
            reason: format!("short_window ({short}) must be less than long_window ({long})"),
        });
    }
    Ok(())
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), AssetlabError> {
    let value = config.get_double("strategy", "initial_capital", 100.0);
    if value <= 0.0 {
        return Err(AssetlabError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "initial_capital".to_string(),
            reason: "initial_capital must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_drawdown_basis(config: &dyn ConfigPort) -> Result<(), AssetlabError> {
    match config.get_string("strategy", "drawdown_basis") {
        None => Ok(()),
        Some(s) => match DrawdownBasis::from_config_value(&s) {
            Some(_) => Ok(()),
            None => Err(AssetlabError::ConfigInvalid {
                section: "strategy".to_string(),
                key: "drawdown_basis".to_string(),
                reason: format!("unknown drawdown basis '{s}' (expected asset_price or strategy_equity)"),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn valid_config() -> FileConfigAdapter {
        FileConfigAdapter::from_string(
            r#"
[data]
path = prices
start_date = 2023-01-01
end_date = 2024-01-01

[strategy]
short_window = 20
long_window = 50
initial_capital = 100.0
drawdown_basis = strategy_equity

[forecast]
days = 30

[report]
tickers = BTC-USD, AAPL
"#,
        )
        .unwrap()
    }

    #[test]
    fn valid_config_passes_all_validators() {
        let config = valid_config();
        assert!(validate_data_config(&config).is_ok());
        assert!(validate_strategy_config(&config).is_ok());
        assert!(validate_forecast_config(&config).is_ok());
        assert!(validate_report_config(&config).is_ok());
    }

    #[test]
    fn missing_data_path_rejected() {
        let config = FileConfigAdapter::from_string(
            "[data]\nstart_date = 2023-01-01\nend_date = 2024-01-01\n",
        )
        .unwrap();
        assert!(matches!(
            validate_data_config(&config),
            Err(AssetlabError::ConfigMissing { .. })
        ));
    }

    #[test]
    fn inverted_dates_rejected() {
        let config = FileConfigAdapter::from_string(
            "[data]\npath = prices\nstart_date = 2024-01-01\nend_date = 2023-01-01\n",
        )
        .unwrap();
        assert!(matches!(
            validate_data_config(&config),
            Err(AssetlabError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn bad_date_format_rejected() {
        let config = FileConfigAdapter::from_string(
            "[data]\npath = prices\nstart_date = 01/01/2023\nend_date = 2024-01-01\n",
        )
        .unwrap();
        assert!(matches!(
            validate_data_config(&config),
            Err(AssetlabError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn window_ordering_rejected() {
        let config = FileConfigAdapter::from_string(
            "[strategy]\nshort_window = 50\nlong_window = 20\n",
        )
        .unwrap();
        let err = validate_strategy_config(&config).unwrap_err();
        match err {
            AssetlabError::ConfigInvalid { section, key, .. } => {
                assert_eq!(section, "strategy");
                assert_eq!(key, "short_window");
            }
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }

    #[test]
    fn zero_window_rejected() {
        let config = FileConfigAdapter::from_string(
            "[strategy]\nshort_window = 0\nlong_window = 20\n",
        )
        .unwrap();
        assert!(validate_strategy_config(&config).is_err());
    }

    #[test]
    fn non_positive_capital_rejected() {
        let config = FileConfigAdapter::from_string(
            "[strategy]\nshort_window = 5\nlong_window = 20\ninitial_capital = 0\n",
        )
        .unwrap();
        assert!(validate_strategy_config(&config).is_err());
    }

    #[test]
    fn unknown_drawdown_basis_rejected() {
        let config = FileConfigAdapter::from_string(
            "[strategy]\nshort_window = 5\nlong_window = 20\ndrawdown_basis = both\n",
        )
        .unwrap();
        assert!(validate_strategy_config(&config).is_err());
    }

    #[test]
    fn absent_drawdown_basis_is_fine() {
        let config = FileConfigAdapter::from_string(
            "[strategy]\nshort_window = 5\nlong_window = 20\n",
        )
        .unwrap();
        assert!(validate_strategy_config(&config).is_ok());
    }

    #[test]
    fn zero_forecast_days_rejected() {
        let config = FileConfigAdapter::from_string("[forecast]\ndays = 0\n").unwrap();
        assert!(matches!(
            validate_forecast_config(&config),
            Err(AssetlabError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn missing_report_tickers_rejected() {
        let config = FileConfigAdapter::from_string("[report]\n").unwrap();
        assert!(matches!(
            validate_report_config(&config),
            Err(AssetlabError::ConfigMissing { .. })
        ));
    }

    #[test]
    fn duplicate_report_tickers_rejected() {
        let config =
            FileConfigAdapter::from_string("[report]\ntickers = AAPL, aapl\n").unwrap();
        assert!(matches!(
            validate_report_config(&config),
            Err(AssetlabError::ConfigInvalid { .. })
        ));
    }
}
