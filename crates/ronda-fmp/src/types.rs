//! Data types for FMP API responses.

use chrono::NaiveDate;
use ronda_traits::{Bar, PriceSeries};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Historical daily price data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPrice {
    /// Date.
    pub date: String,
    /// Open price.
    #[serde(default)]
    pub open: f64,
    /// High price.
    #[serde(default)]
    pub high: f64,
    /// Low price.
    #[serde(default)]
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Adjusted close.
    #[serde(rename = "adjClose", default)]
    pub adj_close: f64,
    /// Volume.
    #[serde(default)]
    pub volume: f64,
}

impl HistoricalPrice {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_day(&self.date)
    }

    /// Adjusted close when the API provides one, otherwise the raw close.
    #[must_use]
    pub fn effective_close(&self) -> f64 {
        if self.adj_close.is_finite() && self.adj_close > 0.0 {
            self.adj_close
        } else {
            self.close
        }
    }
}

/// One earnings announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsRecord {
    /// Symbol.
    #[serde(default)]
    pub symbol: String,
    /// Announcement date.
    pub date: String,
    /// Reported EPS, absent for upcoming announcements.
    #[serde(default)]
    pub eps_actual: Option<f64>,
    /// Consensus EPS estimate.
    #[serde(default)]
    pub eps_estimated: Option<f64>,
    /// Reported revenue.
    #[serde(default)]
    pub revenue_actual: Option<f64>,
    /// Consensus revenue estimate.
    #[serde(default)]
    pub revenue_estimated: Option<f64>,
}

impl EarningsRecord {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_day(&self.date)
    }
}

/// Accepts `YYYY-MM-DD` with an optional time suffix.
fn parse_day(s: &str) -> Option<NaiveDate> {
    let day = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Assemble API prices (newest first, as served) into a chronological series.
///
/// Rows with an unparsable date or a non-finite close are dropped, as are
/// repeated dates after the first.
///
/// # Errors
///
/// Propagates series validation errors.
pub fn to_price_series(symbol: &str, prices: &[HistoricalPrice]) -> ronda_traits::Result<PriceSeries> {
    let mut bars: Vec<Bar> = prices
        .iter()
        .filter_map(|p| {
            let Some(date) = p.parsed_date() else {
                debug!(symbol, date = %p.date, "unparsable price date, skipping");
                return None;
            };
            let close = p.effective_close();
            close
                .is_finite()
                .then(|| Bar::new(date, p.open, p.high, p.low, close, p.volume))
        })
        .collect();

    bars.sort_by_key(|b| b.date);
    bars.dedup_by_key(|b| b.date);
    PriceSeries::new(symbol, bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(date: &str, close: f64, adj_close: f64) -> HistoricalPrice {
        HistoricalPrice {
            date: date.to_string(),
            open: close,
            high: close,
            low: close,
            close,
            adj_close,
            volume: 1_000.0,
        }
    }

    #[test]
    fn test_effective_close_prefers_adjusted() {
        assert!((price("2024-01-02", 10.0, 9.5).effective_close() - 9.5).abs() < 1e-12);
        assert!((price("2024-01-02", 10.0, 0.0).effective_close() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_to_price_series_sorts_and_dedups() {
        let prices = vec![
            price("2024-01-04", 12.0, 0.0),
            price("2024-01-03", 11.0, 0.0),
            price("2024-01-03", 99.0, 0.0),
            price("garbage", 1.0, 0.0),
            price("2024-01-02", 10.0, 0.0),
        ];
        let series = to_price_series("AAA", &prices).unwrap();

        assert_eq!(series.len(), 3);
        let closes: Vec<f64> = series.bars().iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![10.0, 11.0, 12.0]);
        assert_eq!(series.bars()[0].return1(), None);
    }

    #[test]
    fn test_parse_earnings_record() {
        let json = r#"[{"symbol":"AAPL","date":"2024-08-01","epsActual":1.4,"epsEstimated":1.35,
            "revenueActual":null,"revenueEstimated":84000000000,"lastUpdated":"2024-08-02"}]"#;
        let records: Vec<EarningsRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].parsed_date(), NaiveDate::from_ymd_opt(2024, 8, 1));
        assert_eq!(records[0].eps_actual, Some(1.4));
        assert_eq!(records[0].revenue_actual, None);
    }

    #[test]
    fn test_parse_day_with_time_suffix() {
        assert_eq!(parse_day("2024-08-01 16:30:00"), NaiveDate::from_ymd_opt(2024, 8, 1));
        assert_eq!(parse_day("08/01/2024"), None);
    }
}
