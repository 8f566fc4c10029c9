//! Daily price series.
//!
//! A [`PriceSeries`] is an ordered, date-keyed sequence of [`Bar`]s with a
//! derived one-day return. It is built once per study run and read by every
//! downstream stage, so it only exposes immutable access.

use crate::{Date, Result, RondaError, Symbol};
use chrono::{Datelike, Duration, Weekday};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
///
/// Polars stores `Date` values as days since the Unix epoch.
pub const CE_TO_UNIX_EPOCH_DAYS: i32 = 719_163;

/// A single daily OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Trading date.
    pub date: Date,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price (adjusted when the provider supplies one).
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
    return1: Option<f64>,
}

impl Bar {
    /// Create a bar. The one-day return is filled in by [`PriceSeries::new`].
    #[must_use]
    pub const fn new(date: Date, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            return1: None,
        }
    }

    /// Bar where every price equals `close` and volume is zero.
    #[must_use]
    pub const fn from_close(date: Date, close: f64) -> Self {
        Self::new(date, close, close, close, close, 0.0)
    }

    /// `close / previous close - 1`, undefined for the first bar of a series.
    #[must_use]
    pub const fn return1(&self) -> Option<f64> {
        self.return1
    }
}

/// Ordered daily bars for one symbol.
///
/// # Invariants
///
/// - Dates are strictly increasing. Non-trading days are simply absent.
/// - `return1` is `None` for the first bar and whenever the previous close is
///   zero or not finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: Symbol,
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series from bars already in chronological order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if dates are not strictly increasing.
    pub fn new(symbol: impl Into<Symbol>, mut bars: Vec<Bar>) -> Result<Self> {
        let symbol = symbol.into();

        if let Some(w) = bars.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(RondaError::InvalidData(format!(
                "{symbol}: bar dates must be strictly increasing ({} then {})",
                w[0].date, w[1].date
            )));
        }

        let mut prev_close: Option<f64> = None;
        for bar in &mut bars {
            bar.return1 = prev_close
                .filter(|p| p.is_finite() && *p != 0.0)
                .map(|p| bar.close / p - 1.0);
            prev_close = Some(bar.close);
        }

        Ok(Self { symbol, bars })
    }

    /// An empty, valid series: the provider answered but had no bars.
    #[must_use]
    pub fn empty(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::new(),
        }
    }

    /// Build a series from closes, assigning consecutive weekdays from `start`.
    ///
    /// Handy for synthetic data; weekend dates are skipped so the calendar has
    /// the same gaps a real exchange calendar has.
    ///
    /// # Errors
    ///
    /// Never fails in practice; shares the validation path with [`Self::new`].
    pub fn from_closes(symbol: impl Into<Symbol>, start: Date, closes: &[f64]) -> Result<Self> {
        let mut date = start;
        let mut bars = Vec::with_capacity(closes.len());
        for &close in closes {
            while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                date += Duration::days(1);
            }
            bars.push(Bar::from_close(date, close));
            date += Duration::days(1);
        }
        Self::new(symbol, bars)
    }

    /// Symbol this series belongs to.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// All bars in chronological order.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Bar at an ordinal position.
    #[must_use]
    pub fn bar(&self, position: usize) -> Option<&Bar> {
        self.bars.get(position)
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series holds no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// First and last date, if any.
    #[must_use]
    pub fn date_range(&self) -> Option<(Date, Date)> {
        Some((self.bars.first()?.date, self.bars.last()?.date))
    }

    /// Read a series from a DataFrame.
    ///
    /// Required columns: `date`, `close`. Optional: `open`, `high`, `low`,
    /// `volume`, `adj_close`. When `adj_close` is present and finite it is used
    /// as the close. Rows with a missing date or close are dropped, and the
    /// remaining rows are sorted by date.
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` when `date` or `close` is absent and
    /// `InvalidData` when two rows share a date.
    pub fn from_frame(symbol: impl Into<Symbol>, df: &DataFrame) -> Result<Self> {
        for col in ["date", "close"] {
            if df.column(col).is_err() {
                return Err(RondaError::MissingColumn(col.to_string()));
            }
        }

        let dates = date_values(df, "date")?;
        let close = float_values(df, "close")?;
        let adj_close = optional_float_values(df, "adj_close")?;
        let open = optional_float_values(df, "open")?;
        let high = optional_float_values(df, "high")?;
        let low = optional_float_values(df, "low")?;
        let volume = optional_float_values(df, "volume")?;

        let pick = |col: &Option<Vec<Option<f64>>>, i: usize, fallback: f64| {
            col.as_ref()
                .and_then(|v| v[i])
                .filter(|x| x.is_finite())
                .unwrap_or(fallback)
        };

        let mut bars = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let (Some(date), Some(raw_close)) = (dates[i], close[i]) else {
                continue;
            };
            let close = pick(&adj_close, i, raw_close);
            if !close.is_finite() {
                continue;
            }
            bars.push(Bar::new(
                date,
                pick(&open, i, close),
                pick(&high, i, close),
                pick(&low, i, close),
                close,
                pick(&volume, i, 0.0),
            ));
        }
        bars.sort_by_key(|b| b.date);

        Self::new(symbol, bars)
    }

    /// Export bars and one-day returns as a DataFrame.
    ///
    /// # Errors
    ///
    /// Returns an error if the DataFrame cannot be constructed.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let dates: Vec<String> = self
            .bars
            .iter()
            .map(|b| b.date.format("%Y-%m-%d").to_string())
            .collect();
        let field = |f: fn(&Bar) -> f64| self.bars.iter().map(f).collect::<Vec<f64>>();

        Ok(df! {
            "date" => dates,
            "open" => field(|b| b.open),
            "high" => field(|b| b.high),
            "low" => field(|b| b.low),
            "close" => field(|b| b.close),
            "volume" => field(|b| b.volume),
            "return1" => self.bars.iter().map(Bar::return1).collect::<Vec<Option<f64>>>(),
        }?)
    }
}

fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let col = df.column(name)?.cast(&DataType::Float64)?;
    Ok(col.as_materialized_series().f64()?.into_iter().collect())
}

fn optional_float_values(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<f64>>>> {
    if df.column(name).is_err() {
        return Ok(None);
    }
    float_values(df, name).map(Some)
}

fn date_values(df: &DataFrame, name: &str) -> Result<Vec<Option<Date>>> {
    let col = df.column(name)?;

    if col.dtype() == &DataType::String {
        return Ok(col
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|s: Option<&str>| {
                s.and_then(|s| {
                    let s = s.trim();
                    // Accept plain dates and timestamps such as "2024-01-02 00:00:00"
                    Date::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d").ok()
                })
            })
            .collect());
    }

    let col = col.cast(&DataType::Date)?;
    Ok(col
        .as_materialized_series()
        .date()?
        .into_iter()
        .map(|d: Option<i32>| {
            d.and_then(|days| Date::from_num_days_from_ce_opt(days + CE_TO_UNIX_EPOCH_DAYS))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_return1_derivation() {
        let series = PriceSeries::from_closes("TEST", d(2024, 1, 1), &[100.0, 105.0, 94.5]).unwrap();

        assert!(series.bars()[0].return1().is_none());
        assert_relative_eq!(series.bars()[1].return1().unwrap(), 0.05, epsilon = 1e-12);
        assert_relative_eq!(series.bars()[2].return1().unwrap(), -0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_return1_undefined_after_zero_close() {
        let series = PriceSeries::from_closes("TEST", d(2024, 1, 1), &[0.0, 10.0]).unwrap();
        assert!(series.bars()[1].return1().is_none());
    }

    #[test]
    fn test_from_closes_skips_weekends() {
        // 2024-01-05 is a Friday
        let series = PriceSeries::from_closes("TEST", d(2024, 1, 5), &[1.0, 2.0, 3.0]).unwrap();
        let dates: Vec<Date> = series.bars().iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![d(2024, 1, 5), d(2024, 1, 8), d(2024, 1, 9)]);
    }

    #[test]
    fn test_new_rejects_unordered_dates() {
        let bars = vec![
            Bar::from_close(d(2024, 1, 3), 1.0),
            Bar::from_close(d(2024, 1, 2), 1.0),
        ];
        assert!(matches!(
            PriceSeries::new("TEST", bars),
            Err(RondaError::InvalidData(_))
        ));
    }

    #[test]
    fn test_new_rejects_duplicate_dates() {
        let bars = vec![
            Bar::from_close(d(2024, 1, 2), 1.0),
            Bar::from_close(d(2024, 1, 2), 2.0),
        ];
        assert!(PriceSeries::new("TEST", bars).is_err());
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::empty("TEST");
        assert!(series.is_empty());
        assert!(series.date_range().is_none());
    }

    #[test]
    fn test_from_frame_string_dates_unsorted() {
        let df = df! {
            "date" => &["2024-01-03", "2024-01-02", "2024-01-04"],
            "close" => &[11.0, 10.0, 12.1],
            "volume" => &[300i64, 200, 400],
        }
        .unwrap();

        let series = PriceSeries::from_frame("TEST", &df).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.bars()[0].date, d(2024, 1, 2));
        assert_relative_eq!(series.bars()[0].volume, 200.0);
        assert_relative_eq!(series.bars()[1].return1().unwrap(), 0.1, epsilon = 1e-12);
        // Missing OHL fall back to close
        assert_relative_eq!(series.bars()[2].open, 12.1);
    }

    #[test]
    fn test_from_frame_prefers_adj_close_and_drops_null_close() {
        let df = df! {
            "date" => &["2024-01-02", "2024-01-03", "2024-01-04"],
            "close" => &[Some(10.0), None, Some(12.0)],
            "adj_close" => &[Some(5.0), Some(5.5), None],
        }
        .unwrap();

        let series = PriceSeries::from_frame("TEST", &df).unwrap();
        assert_eq!(series.len(), 2);
        assert_relative_eq!(series.bars()[0].close, 5.0);
        assert_relative_eq!(series.bars()[1].close, 12.0);
    }

    #[test]
    fn test_from_frame_missing_close() {
        let df = df! { "date" => &["2024-01-02"] }.unwrap();
        assert!(matches!(
            PriceSeries::from_frame("TEST", &df),
            Err(RondaError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_to_frame_shape() {
        let series = PriceSeries::from_closes("TEST", d(2024, 1, 1), &[1.0, 2.0]).unwrap();
        let df = series.to_frame().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 7);
        assert_eq!(df.column("return1").unwrap().null_count(), 1);
    }
}
