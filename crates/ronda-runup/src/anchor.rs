//! Pre-earnings anchors and run-up rows.
//!
//! For each earnings date the anchor is the last trading bar strictly before
//! it. A run-up for lookback `Y` runs from the bar `Y` trading days before the
//! anchor to the anchor itself. Unresolvable pairs are skipped, so a ticker
//! with thin early history still yields rows for later dates and shorter
//! lookbacks.

use ronda_traits::{Date, Horizons, PriceSeries, TradingCalendar};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A resolved trading bar used as one end of a run-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorBar {
    /// Bar date.
    pub date: Date,
    /// Bar close.
    pub close: f64,
}

/// The pre-earnings close for one earnings date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarningsAnchor {
    /// Earnings announcement date.
    pub earnings_date: Date,
    /// Last bar strictly before the announcement; `None` if the series starts
    /// on or after it.
    pub pre_earnings: Option<AnchorBar>,
}

/// One measured run-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunupRow {
    /// Ticker symbol.
    pub symbol: String,
    /// Earnings announcement date.
    pub earnings_date: Date,
    /// Lookback in trading days.
    pub lookback: usize,
    /// Start of the window, `lookback` bars before the anchor.
    pub start: AnchorBar,
    /// Pre-earnings anchor.
    pub pre_earnings: AnchorBar,
    /// `(pre - start) / start * 100`.
    pub runup_pct: f64,
}

/// Percentage change from `start` to `end`.
#[must_use]
pub fn runup_pct(start: f64, end: f64) -> f64 {
    (end - start) / start * 100.0
}

/// Resolve the pre-earnings anchor of every earnings date.
#[must_use]
pub fn resolve_anchors(series: &PriceSeries, earnings_dates: &[Date]) -> Vec<EarningsAnchor> {
    earnings_dates
        .iter()
        .map(|&earnings_date| EarningsAnchor {
            earnings_date,
            pre_earnings: series.bar_before(earnings_date).map(|(_, bar)| AnchorBar {
                date: bar.date,
                close: bar.close,
            }),
        })
        .collect()
}

/// Measure run-ups for every (anchor, lookback) pair that resolves.
///
/// Rows are ordered by lookback, then by earnings date order of `anchors`.
#[must_use]
pub fn runup_rows(
    series: &PriceSeries,
    anchors: &[EarningsAnchor],
    lookbacks: &Horizons,
) -> Vec<RunupRow> {
    let mut rows = Vec::new();

    for lookback in lookbacks.iter() {
        for anchor in anchors {
            let Some(pre) = anchor.pre_earnings else {
                continue;
            };
            let Some(start_bar) = series
                .nth_before(pre.date, lookback)
                .and_then(|pos| series.bar(pos))
            else {
                debug!(
                    symbol = series.symbol(),
                    earnings_date = %anchor.earnings_date,
                    lookback,
                    "not enough history before anchor, skipping"
                );
                continue;
            };

            let start = AnchorBar {
                date: start_bar.date,
                close: start_bar.close,
            };
            rows.push(RunupRow {
                symbol: series.symbol().to_string(),
                earnings_date: anchor.earnings_date,
                lookback,
                start,
                pre_earnings: pre,
                runup_pct: runup_pct(start.close, pre.close),
            });
        }
    }

    rows
}
