//! Per-horizon distribution summaries of forward returns.

use crate::ForwardOutcome;
use ronda_traits::{Horizons, stats::Describe};
use serde::{Deserialize, Serialize};

/// Summary statistics of forward returns at one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Horizon in trading days.
    pub horizon: usize,
    /// Statistics over the defined outcomes at this horizon.
    #[serde(flatten)]
    pub stats: Describe,
}

impl SummaryRow {
    /// Horizon label as used in reports, e.g. `+5d`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("+{}d", self.horizon)
    }
}

/// Summarize outcomes for every requested horizon.
///
/// Missing outcomes are dropped before computing statistics, so `n` can
/// shrink at longer horizons. A horizon with no samples still gets a row,
/// with every statistic undefined.
#[must_use]
pub fn summarize(outcomes: &[ForwardOutcome], horizons: &Horizons) -> Vec<SummaryRow> {
    horizons
        .iter()
        .map(|horizon| {
            let values: Vec<f64> = outcomes.iter().filter_map(|o| o.at(horizon)).collect();
            SummaryRow {
                horizon,
                stats: Describe::of(&values),
            }
        })
        .collect()
}
