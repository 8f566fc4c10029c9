//! Earnings-date selection and history planning.

use chrono::Duration;
use ronda_traits::{Date, Horizons};

/// Number of earnings dates requested from a provider before filtering.
pub const EARNINGS_FETCH_LIMIT: usize = 60;

/// Lookback assumed when planning history without any lookbacks set.
const DEFAULT_MAX_LOOKBACK: usize = 20;

/// Keep the latest `count` distinct dates strictly before `today`, in
/// chronological order.
#[must_use]
pub fn select_past_earnings(dates: &[Date], today: Date, count: usize) -> Vec<Date> {
    let mut past: Vec<Date> = dates.iter().copied().filter(|d| *d < today).collect();
    past.sort_unstable();
    past.dedup();
    let skip = past.len().saturating_sub(count);
    past.split_off(skip)
}

/// Calendar window of daily history needed to measure run-ups.
///
/// Starts `2 * maxY + 15` calendar days before the earliest earnings date,
/// which comfortably covers `maxY` trading days across weekends and
/// holidays, and ends 5 days after the latest one. Returns `None` when there
/// are no earnings dates or the window falls outside the calendar.
#[must_use]
pub fn history_window(earnings_dates: &[Date], lookbacks: &Horizons) -> Option<(Date, Date)> {
    let earliest = earnings_dates.iter().min()?;
    let latest = earnings_dates.iter().max()?;
    let max_y = lookbacks.max().unwrap_or(DEFAULT_MAX_LOOKBACK);
    let pad_days = i64::try_from(max_y).ok()?.checked_mul(2)?.checked_add(15)?;

    let start = earliest.checked_sub_signed(Duration::try_days(pad_days)?)?;
    let end = latest.checked_add_signed(Duration::try_days(5)?)?;
    Some((start, end))
}
