//! Per-ticker run-up results and their batch fold.

use crate::{
    BestPick, EarningsAnchor, RankingConfig, RunupRow, TickerYSummary, pick_best, resolve_anchors,
    runup_rows, summarize_runups,
};
use ronda_traits::{Date, Horizons, PriceSeries, Result, RondaError};
use serde::{Deserialize, Serialize};

/// Parameters of a run-up study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunupConfig {
    /// Number of most recent past earnings dates per ticker (X).
    pub earnings_count: usize,
    /// Lookbacks in trading days (Y).
    pub lookbacks: Horizons,
}

impl Default for RunupConfig {
    fn default() -> Self {
        Self {
            earnings_count: 6,
            lookbacks: Horizons::new([5, 10, 15, 20]).unwrap_or_default(),
        }
    }
}

impl RunupConfig {
    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when no earnings dates or no lookbacks are
    /// requested.
    pub fn validate(&self) -> Result<()> {
        if self.earnings_count == 0 {
            return Err(RondaError::InvalidParameter(
                "earnings_count must be at least 1".to_string(),
            ));
        }
        if self.lookbacks.is_empty() {
            return Err(RondaError::InvalidParameter(
                "at least one lookback is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything measured for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerRunups {
    /// Ticker symbol.
    pub symbol: String,
    /// Anchors of the selected earnings dates.
    pub anchors: Vec<EarningsAnchor>,
    /// Resolved run-ups.
    pub rows: Vec<RunupRow>,
    /// Per-lookback summaries.
    pub summaries: Vec<TickerYSummary>,
}

impl TickerRunups {
    /// Result for a ticker that produced nothing.
    #[must_use]
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            anchors: Vec::new(),
            rows: Vec::new(),
            summaries: Vec::new(),
        }
    }

    /// Whether no run-up resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Measure and summarize run-ups of one ticker.
///
/// `earnings_dates` should already be the selected past dates, see
/// [`select_past_earnings`](crate::select_past_earnings).
#[must_use]
pub fn compute_ticker_runups(
    series: &PriceSeries,
    earnings_dates: &[Date],
    config: &RunupConfig,
) -> TickerRunups {
    let anchors = resolve_anchors(series, earnings_dates);
    let rows = runup_rows(series, &anchors, &config.lookbacks);
    let summaries = summarize_runups(
        series.symbol(),
        config.earnings_count,
        &rows,
        &config.lookbacks,
    );

    TickerRunups {
        symbol: series.symbol().to_string(),
        anchors,
        rows,
        summaries,
    }
}

/// Results of many tickers, in the order they were folded in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunupBatch {
    tickers: Vec<TickerRunups>,
}

impl RunupBatch {
    /// Empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tickers: Vec::new(),
        }
    }

    /// Add one ticker's result.
    pub fn push(&mut self, result: TickerRunups) {
        self.tickers.push(result);
    }

    /// Per-ticker results.
    #[must_use]
    pub fn tickers(&self) -> &[TickerRunups] {
        &self.tickers
    }

    /// All run-up rows, ticker by ticker.
    pub fn rows(&self) -> impl Iterator<Item = &RunupRow> {
        self.tickers.iter().flat_map(|t| t.rows.iter())
    }

    /// All (ticker, lookback) summaries.
    #[must_use]
    pub fn grid(&self) -> Vec<TickerYSummary> {
        self.tickers
            .iter()
            .flat_map(|t| t.summaries.iter().cloned())
            .collect()
    }

    /// Best lookback per ticker under `config`.
    #[must_use]
    pub fn best_picks(&self, config: &RankingConfig) -> Vec<BestPick> {
        pick_best(&self.grid(), config)
    }
}

impl FromIterator<TickerRunups> for RunupBatch {
    fn from_iter<I: IntoIterator<Item = TickerRunups>>(iter: I) -> Self {
        Self {
            tickers: iter.into_iter().collect(),
        }
    }
}

impl Extend<TickerRunups> for RunupBatch {
    fn extend<I: IntoIterator<Item = TickerRunups>>(&mut self, iter: I) {
        self.tickers.extend(iter);
    }
}
