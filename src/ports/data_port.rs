//! Data access port trait.

use crate::domain::error::AssetlabError;
use crate::domain::series::PricePoint;
use chrono::NaiveDate;

pub trait DataPort {
    /// Fetch the dated close-price series for one ticker, sorted by date
    /// and restricted to `[start_date, end_date]`.
    fn fetch_prices(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, AssetlabError>;

    fn list_tickers(&self) -> Result<Vec<String>, AssetlabError>;
}
