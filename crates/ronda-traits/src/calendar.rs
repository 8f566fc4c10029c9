//! Trading-calendar index.
//!
//! Lookups work on ordinal position within a [`PriceSeries`], never on
//! calendar arithmetic, so weekends and holidays are skipped for free: only
//! actual trading bars are indexed. Every lookup returns `None` when it cannot
//! be resolved so callers can skip the item instead of aborting a batch.

use crate::{Bar, Date, PriceSeries};

/// Position-based lookups over a date-ordered sequence of bars.
pub trait TradingCalendar {
    /// Position of the bar dated exactly `date`.
    fn position_of(&self, date: Date) -> Option<usize>;

    /// Position of the most recent bar strictly before `date`.
    fn last_before(&self, date: Date) -> Option<usize>;

    /// Position of the bar exactly `n` trading bars before `date`.
    ///
    /// Counts only bars strictly before `date`; `n = 1` is the same bar as
    /// [`Self::last_before`]. Returns `None` for `n = 0` or when fewer than `n`
    /// bars precede `date`.
    fn nth_before(&self, date: Date, n: usize) -> Option<usize>;
}

impl PriceSeries {
    /// Number of bars dated strictly before `date`.
    fn count_before(&self, date: Date) -> usize {
        self.bars().partition_point(|b| b.date < date)
    }

    /// Bar plus position for the most recent bar strictly before `date`.
    #[must_use]
    pub fn bar_before(&self, date: Date) -> Option<(usize, &Bar)> {
        let pos = self.last_before(date)?;
        Some((pos, self.bar(pos)?))
    }
}

impl TradingCalendar for PriceSeries {
    fn position_of(&self, date: Date) -> Option<usize> {
        self.bars().binary_search_by_key(&date, |b| b.date).ok()
    }

    fn last_before(&self, date: Date) -> Option<usize> {
        self.count_before(date).checked_sub(1)
    }

    fn nth_before(&self, date: Date, n: usize) -> Option<usize> {
        if n == 0 {
            return None;
        }
        self.count_before(date).checked_sub(n)
    }
}
