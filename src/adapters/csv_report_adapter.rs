//! CSV report adapter.
//!
//! Writes one row per ticker with 6-decimal numeric precision. Undefined
//! metrics and absent errors are empty fields, so a failed ticker still
//! lands in the file next to the successful ones.

use crate::domain::error::AssetlabError;
use crate::domain::metrics::MetricValue;
use crate::domain::report::ReportRow;
use crate::ports::report_port::ReportPort;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    /// Default output location: `<dir>/daily_report_<YYYY-MM-DD>.csv`.
    pub fn default_report_path(dir: &Path, date: NaiveDate) -> PathBuf {
        dir.join(format!("daily_report_{}.csv", date.format("%Y-%m-%d")))
    }
}

fn format_metric(value: &MetricValue) -> String {
    match value {
        MetricValue::Defined(v) => format!("{:.6}", v),
        MetricValue::Undefined => String::new(),
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, rows: &[ReportRow], output_path: &Path) -> Result<(), AssetlabError> {
        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| AssetlabError::Data {
            reason: format!("failed to open {}: {}", output_path.display(), e),
        })?;

        wtr.write_record([
            "ticker",
            "cumulative_return",
            "vol_daily",
            "sharpe",
            "max_drawdown",
            "error",
        ])
        .map_err(|e| AssetlabError::Data {
            reason: format!("CSV write error: {}", e),
        })?;

        for row in rows {
            let record = match &row.metrics {
                Some(m) => [
                    row.ticker.clone(),
                    format!("{:.6}", m.cumulative_return),
                    format_metric(&m.vol_daily),
                    format_metric(&m.sharpe),
                    format!("{:.6}", m.max_drawdown),
                    String::new(),
                ],
                None => [
                    row.ticker.clone(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    row.error.clone().unwrap_or_default(),
                ],
            };
            wtr.write_record(&record).map_err(|e| AssetlabError::Data {
                reason: format!("CSV write error: {}", e),
            })?;
        }

        wtr.flush()?;
        Ok(())
    }
}
