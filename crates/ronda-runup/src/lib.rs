//! Pre-earnings run-up studies for ronda.
//!
//! For each ticker, the most recent past earnings dates are anchored on the
//! last trading bar before the announcement, and the run-up into that bar is
//! measured over several trading-day lookbacks. Summaries per
//! (ticker, lookback) are then ranked to pick each ticker's best lookback.
//!
//! # Example
//!
//! ```rust,ignore
//! use ronda_runup::{RankingConfig, RunupConfig, run_batch};
//!
//! let batch = run_batch(provider, &symbols, &RunupConfig::default(), today).await?;
//! for pick in batch.best_picks(&RankingConfig::default()) {
//!     println!("{} Y={} score={:.3}", pick.summary.symbol, pick.summary.lookback, pick.score);
//! }
//! ```

pub mod anchor;
pub mod batch;
pub mod earnings;
pub mod frame;
pub mod ranking;
pub mod runner;
pub mod summary;

// Re-export main types
pub use anchor::{AnchorBar, EarningsAnchor, RunupRow, resolve_anchors, runup_pct, runup_rows};
pub use batch::{RunupBatch, RunupConfig, TickerRunups, compute_ticker_runups};
pub use earnings::{EARNINGS_FETCH_LIMIT, history_window, select_past_earnings};
pub use frame::{best_frame, grid_frame, rows_frame};
pub use ranking::{BestPick, RankingConfig, ScoreMode, pick_best};
pub use runner::{run_batch, run_ticker};
pub use summary::{TickerYSummary, summarize_runups};
