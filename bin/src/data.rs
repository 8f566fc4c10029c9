//! Data sources for the ronda CLI.
//!
//! Prices and earnings come from the FMP API by default. With `--data-dir`
//! they are read from local CSV files instead:
//!
//! - `<DIR>/<SYMBOL>.csv` with `date`, `close` and optionally `open`, `high`,
//!   `low`, `volume`, `adj_close`
//! - `<DIR>/<SYMBOL>.earnings.csv` with a `date` column

use chrono::NaiveDate;
use polars::prelude::*;
use ronda_fmp::FmpClient;
use ronda_traits::{
    Date, EarningsCalendarProvider, PriceHistoryProvider, PriceSeries, RondaError,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where prices and earnings dates come from.
#[derive(Debug, Clone)]
pub(crate) enum DataSource {
    /// Financial Modeling Prep REST API.
    Fmp(FmpClient),
    /// Directory of CSV files.
    Directory(PathBuf),
}

impl DataSource {
    /// Local directory when given, the FMP API otherwise.
    pub(crate) fn resolve(data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        match data_dir {
            Some(dir) => {
                if !dir.is_dir() {
                    anyhow::bail!("data directory {} does not exist", dir.display());
                }
                Ok(Self::Directory(dir))
            }
            None => Ok(Self::Fmp(FmpClient::from_env()?)),
        }
    }
}

impl PriceHistoryProvider for DataSource {
    async fn daily_bars(
        &self,
        symbol: &str,
        start: Date,
        end: Option<Date>,
    ) -> ronda_traits::Result<PriceSeries> {
        match self {
            Self::Fmp(client) => client.daily_bars(symbol, start, end).await,
            Self::Directory(dir) => {
                let path = dir.join(format!("{symbol}.csv"));
                if !path.is_file() {
                    return Err(RondaError::NoData(symbol.to_string()));
                }
                let full = PriceSeries::from_frame(symbol, &read_csv(&path)?)?;
                let bars = full
                    .bars()
                    .iter()
                    .filter(|b| b.date >= start && end.is_none_or(|e| b.date <= e))
                    .cloned()
                    .collect();
                PriceSeries::new(symbol, bars)
            }
        }
    }
}

impl EarningsCalendarProvider for DataSource {
    async fn earnings_dates(&self, symbol: &str, limit: usize) -> ronda_traits::Result<Vec<Date>> {
        match self {
            Self::Fmp(client) => client.earnings_dates(symbol, limit).await,
            Self::Directory(dir) => {
                let path = dir.join(format!("{symbol}.earnings.csv"));
                if !path.is_file() {
                    debug!(symbol, path = %path.display(), "no earnings file");
                    return Ok(Vec::new());
                }
                let df = read_csv(&path)?;
                let column = df
                    .column("date")
                    .map_err(|_| RondaError::MissingColumn("date".to_string()))?
                    .cast(&DataType::String)?;
                let mut dates: Vec<Date> = column
                    .as_materialized_series()
                    .str()?
                    .into_iter()
                    .flatten()
                    .filter_map(|s| parse_date(s.get(..10).unwrap_or(s)).ok())
                    .collect();
                // newest first, like the API
                dates.sort_unstable_by(|a, b| b.cmp(a));
                dates.dedup();
                dates.truncate(limit);
                Ok(dates)
            }
        }
    }
}

fn read_csv(path: &Path) -> ronda_traits::Result<DataFrame> {
    Ok(LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()?
        .collect()?)
}

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> ronda_traits::Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|e| RondaError::InvalidDate(format!("'{date_str}': {e}")))
}
