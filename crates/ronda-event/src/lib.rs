//! Event studies for ronda.
//!
//! Measures how a security behaves after a large single-day move:
//! - Event detection by threshold and direction, with cooldown thinning
//! - Forward returns over multiple trading-day horizons
//! - Distribution summaries (mean, median, std, win rate, percentiles)
//!
//! # Example
//!
//! ```rust,ignore
//! use ronda_event::{EventStudy, EventStudyConfig};
//! use ronda_traits::Direction;
//!
//! let study = EventStudy::new(EventStudyConfig::from_percent(7.0, Direction::Down));
//! let report = study.run(&series)?;
//! for row in &report.summary {
//!     println!("{} n={} mean={:?}", row.label(), row.stats.n, row.stats.mean);
//! }
//! ```

pub mod detector;
pub mod forward;
pub mod frame;
pub mod study;
pub mod summary;
pub mod table;

// Re-export main types
pub use detector::{DetectorConfig, Event, EventSet, apply_cooldown, detect_events, qualifying_moves};
pub use forward::{ForwardOutcome, forward_return, forward_returns};
pub use frame::{events_frame, outcomes_frame, summary_frame};
pub use study::{EventStudy, EventStudyConfig, EventStudyReport};
pub use summary::{SummaryRow, summarize};
pub use table::{EventRow, event_table};
