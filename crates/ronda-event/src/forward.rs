//! Forward returns anchored to event dates.

use crate::EventSet;
use ronda_traits::{Date, Horizons, PriceSeries, TradingCalendar};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Forward returns of one event across all requested horizons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardOutcome {
    /// Event date.
    pub date: Date,
    /// Horizon (trading days) to forward return; `None` when the series ends
    /// before the horizon.
    pub returns: BTreeMap<usize, Option<f64>>,
}

impl ForwardOutcome {
    /// Forward return at `horizon`, if requested and defined.
    #[must_use]
    pub fn at(&self, horizon: usize) -> Option<f64> {
        self.returns.get(&horizon).copied().flatten()
    }
}

/// `close[i + h] / close[i] - 1`, or `None` past the end of the series.
#[must_use]
pub fn forward_return(series: &PriceSeries, position: usize, horizon: usize) -> Option<f64> {
    let base = series.bar(position)?.close;
    let later = series.bar(position.checked_add(horizon)?)?.close;
    Some(later / base - 1.0)
}

/// Compute forward returns for each event over each horizon.
///
/// Events whose date is not a bar of `series` are skipped. The output is
/// sorted by event date.
#[must_use]
pub fn forward_returns(
    series: &PriceSeries,
    events: &EventSet,
    horizons: &Horizons,
) -> Vec<ForwardOutcome> {
    let mut outcomes: Vec<ForwardOutcome> = events
        .dates()
        .filter_map(|date| {
            let Some(position) = series.position_of(date) else {
                debug!(symbol = series.symbol(), %date, "event date not in series, skipping");
                return None;
            };
            let returns = horizons
                .iter()
                .map(|h| (h, forward_return(series, position, h)))
                .collect();
            Some(ForwardOutcome { date, returns })
        })
        .collect();

    outcomes.sort_by_key(|o| o.date);
    outcomes
}
