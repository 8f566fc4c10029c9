//! Financial Modeling Prep (FMP) data provider for ronda.
//!
//! Implements [`PriceHistoryProvider`](ronda_traits::PriceHistoryProvider)
//! and [`EarningsCalendarProvider`](ronda_traits::EarningsCalendarProvider)
//! on top of the [Financial Modeling Prep](https://financialmodelingprep.com/)
//! stable API.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ronda_fmp::FmpClient;
//! use ronda_traits::{EarningsCalendarProvider, PriceHistoryProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!
//!     let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//!     let series = client.daily_bars("NVDA", start, None).await?;
//!     let earnings = client.earnings_dates("NVDA", 40).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `RONDA_FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! RONDA_FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod types;

pub use client::{API_KEY_VAR, FmpClient};
pub use error::FmpError;
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
