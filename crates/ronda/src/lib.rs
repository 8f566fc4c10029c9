#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # ronda
//!
//! Conditional return statistics around dated triggers.
//!
//! ronda is an umbrella crate that re-exports all ronda sub-crates for
//! convenience. It answers two questions about a daily price history:
//!
//! 1. What happens over the next few sessions after a large one-day move?
//! 2. How much does a stock drift in the sessions before its earnings?
//!
//! ## Quick Start
//!
//! ```ignore
//! use ronda::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let series = PriceSeries::from_frame("NVDA", &frame)?;
//!
//! let study = EventStudy::new(EventStudyConfig::from_percent(5.0, Direction::Down));
//! let report = study.run(&series)?;
//! for row in &report.summary {
//!     println!("{}: n={} mean={:?}", row.label(), row.stats.n, row.stats.mean);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Data model, trading calendar, statistics and provider traits
//! - [`event`] - Event detection, forward returns and their summaries
//! - [`runup`] - Pre-earnings run-ups and lookback ranking
//! - [`fmp`] - Financial Modeling Prep data provider

/// Version information for the ronda crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core data model for ronda.
///
/// - [`PriceSeries`] - Chronological daily bars with one-day returns
/// - [`TradingCalendar`] - Position-based lookups over trading days
/// - [`PriceHistoryProvider`] / [`EarningsCalendarProvider`] - Data sources
pub mod traits {
    pub use ronda_traits::*;
}

pub use ronda_traits::{
    Date, Direction, EarningsCalendarProvider, Horizons, PriceHistoryProvider, PriceSeries,
    Result, RondaError, Symbol, TradingCalendar,
};

// ============================================================================
// Studies
// ============================================================================

/// Event studies.
///
/// Detects large single-day moves, measures forward returns over several
/// trading-day horizons and summarizes their distribution.
///
/// # Example
///
/// ```ignore
/// use ronda::event::{EventStudy, EventStudyConfig};
///
/// let report = EventStudy::new(EventStudyConfig::default()).run(&series)?;
/// println!("{} events", report.sample());
/// ```
pub mod event {
    pub use ronda_event::*;
}

/// Pre-earnings run-up studies.
///
/// Anchors each past earnings date on the last session before it, measures
/// the run-up over several lookbacks and ranks lookbacks per ticker.
///
/// ## Score Modes
///
/// - **avg**: mean run-up
/// - **sharpe**: mean over standard deviation, or the mean when the deviation is zero
/// - **avg_with_win**: mean scaled by `0.5 + 0.5 * win_rate`
pub mod runup {
    pub use ronda_runup::*;
}

// ============================================================================
// Data Providers
// ============================================================================

/// Financial Modeling Prep (FMP) API client.
///
/// ## Setup
///
/// 1. Get an API key at <https://financialmodelingprep.com/>
/// 2. Set the `RONDA_FMP_API_KEY` environment variable or add it to `.env`
pub mod fmp {
    pub use ronda_fmp::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use ronda::prelude::*;
/// ```
pub mod prelude {
    pub use crate::traits::*;
    pub use ronda_event::{EventStudy, EventStudyConfig, EventStudyReport};
    pub use ronda_runup::{RankingConfig, RunupBatch, RunupConfig, ScoreMode};
}
