//! Compact per-event detail table.

use crate::EventSet;
use ronda_traits::{Date, PriceSeries, TradingCalendar};
use serde::{Deserialize, Serialize};

/// One event with the bar that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    /// Event date.
    pub date: Date,
    /// Close-to-close move that triggered the event.
    pub move_pct: f64,
    /// Open of the event bar.
    pub open: f64,
    /// Close of the event bar.
    pub close: f64,
    /// Volume of the event bar.
    pub volume: f64,
}

/// Build the detail table for an event set, sorted by date.
#[must_use]
pub fn event_table(series: &PriceSeries, events: &EventSet) -> Vec<EventRow> {
    let mut rows: Vec<EventRow> = events
        .events()
        .iter()
        .filter_map(|event| {
            let bar = series.bar(series.position_of(event.date)?)?;
            Some(EventRow {
                date: event.date,
                move_pct: event.ret,
                open: bar.open,
                close: bar.close,
                volume: bar.volume,
            })
        })
        .collect();
    rows.sort_by_key(|r| r.date);
    rows
}
