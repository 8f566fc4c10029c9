//! Data-provider collaborator traits.
//!
//! The study engines never fetch data themselves: callers resolve a
//! [`PriceSeries`] and a list of earnings dates through these traits and hand
//! them over. Implementations live in adapter crates (REST clients, local
//! files).

use crate::{Date, PriceSeries, Result};
use std::future::Future;

/// Source of daily price history.
pub trait PriceHistoryProvider {
    /// Fetch daily bars for `symbol` between `start` and `end` (inclusive).
    ///
    /// `end = None` means "up to the latest available bar". The returned
    /// series is chronological and duplicate-free, with adjusted closes when
    /// the provider has them.
    ///
    /// # Errors
    ///
    /// Returns `RondaError::NoData` when the provider knows nothing about the
    /// symbol. An empty but valid answer is `Ok` with an empty series.
    fn daily_bars(
        &self,
        symbol: &str,
        start: Date,
        end: Option<Date>,
    ) -> impl Future<Output = Result<PriceSeries>> + Send;
}

/// Source of historical earnings announcement dates.
pub trait EarningsCalendarProvider {
    /// Fetch up to `limit` earnings dates for `symbol`, in any order and
    /// possibly including future dates.
    ///
    /// Callers normalize the answer with a past-dates filter; providers only
    /// need to return what they have.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider fails. Callers treat that as "no
    /// earnings dates" for the affected symbol.
    fn earnings_dates(
        &self,
        symbol: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Date>>> + Send;
}
