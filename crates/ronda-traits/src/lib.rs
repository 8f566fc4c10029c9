#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core data model for the Ronda event-study toolkit.
//!
//! This crate provides the foundations shared by the event study and the
//! earnings run-up study: the daily [`PriceSeries`], the position-based
//! [`TradingCalendar`] index, distribution statistics, and the data-provider
//! traits implemented by adapter crates.

/// The version of the ronda-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod calendar;
pub mod error;
pub mod provider;
pub mod series;
pub mod stats;
pub mod types;

// Re-exports
pub use calendar::TradingCalendar;
pub use error::{Result, RondaError};
pub use provider::{EarningsCalendarProvider, PriceHistoryProvider};
pub use series::{Bar, CE_TO_UNIX_EPOCH_DAYS, PriceSeries};
pub use types::{Date, Direction, Horizons, Symbol};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
