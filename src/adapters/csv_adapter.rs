//! CSV file price-data adapter.
//!
//! One `<TICKER>.csv` file per asset with `date,close` columns.

use crate::domain::error::AssetlabError;
use crate::domain::series::PricePoint;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_prices(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, AssetlabError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| AssetlabError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut prices = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| AssetlabError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| AssetlabError::Data {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                AssetlabError::Data {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            let close: f64 = record
                .get(1)
                .ok_or_else(|| AssetlabError::Data {
                    reason: "missing close column".into(),
                })?
                .parse()
                .map_err(|e| AssetlabError::Data {
                    reason: format!("invalid close value: {}", e),
                })?;

            if close <= 0.0 {
                return Err(AssetlabError::Data {
                    reason: format!("non-positive close {} on {}", close, date),
                });
            }

            prices.push(PricePoint { date, close });
        }

        prices.sort_by_key(|p| p.date);
        Ok(prices)
    }

    fn list_tickers(&self) -> Result<Vec<String>, AssetlabError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| AssetlabError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut tickers = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| AssetlabError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(ticker) = name_str.strip_suffix(".csv") {
                tickers.push(ticker.to_string());
            }
        }

        tickers.sort();
        Ok(tickers)
    }
}
