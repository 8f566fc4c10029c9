//! Per-(ticker, lookback) aggregation of run-up rows.

use crate::RunupRow;
use ronda_traits::{Horizons, stats};
use serde::{Deserialize, Serialize};

/// Aggregated run-ups of one ticker at one lookback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerYSummary {
    /// Ticker symbol.
    pub symbol: String,
    /// Number of earnings dates requested for the ticker.
    pub earnings_count: usize,
    /// Lookback in trading days.
    pub lookback: usize,
    /// Mean run-up in percent.
    pub avg_runup_pct: f64,
    /// Sample standard deviation in percent, 0 for a single sample.
    pub std_runup_pct: f64,
    /// Fraction of strictly positive run-ups.
    pub win_rate: f64,
    /// Number of run-ups aggregated.
    pub samples: usize,
}

/// Summarize `rows` of one ticker per lookback.
///
/// Non-finite run-ups (a zero start close) are left out of every statistic,
/// including `samples`. A lookback with no usable rows produces no summary.
#[must_use]
pub fn summarize_runups(
    symbol: &str,
    earnings_count: usize,
    rows: &[RunupRow],
    lookbacks: &Horizons,
) -> Vec<TickerYSummary> {
    lookbacks
        .iter()
        .filter_map(|lookback| {
            let values: Vec<f64> = rows
                .iter()
                .filter(|r| r.lookback == lookback)
                .map(|r| r.runup_pct)
                .collect();
            let values = stats::finite(&values);
            let avg_runup_pct = stats::mean(&values)?;

            Some(TickerYSummary {
                symbol: symbol.to_string(),
                earnings_count,
                lookback,
                avg_runup_pct,
                std_runup_pct: stats::sample_std(&values).unwrap_or(0.0),
                win_rate: stats::win_rate(&values).unwrap_or(0.0),
                samples: values.len(),
            })
        })
        .collect()
}
