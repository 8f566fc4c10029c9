//! Large-move event detection.
//!
//! Marks every bar whose one-day return breaches a threshold in the requested
//! direction, then thins clustered events with a calendar-day cooldown.

use ronda_traits::{Date, Direction, PriceSeries, Result, RondaError};
use serde::{Deserialize, Serialize};

/// Configuration for event detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Minimum absolute one-day return, as a fraction (0.05 = 5%).
    pub threshold: f64,
    /// Which side of the distribution qualifies.
    pub direction: Direction,
    /// Minimum calendar-day gap between kept events; 0 disables thinning.
    pub cooldown_days: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: 0.05,
            direction: Direction::Both,
            cooldown_days: 0,
        }
    }
}

impl DetectorConfig {
    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the threshold is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(RondaError::InvalidParameter(format!(
                "Threshold must be a non-negative fraction, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// A bar whose one-day return crossed the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Date of the triggering bar.
    pub date: Date,
    /// Sign of the triggering move (`Up` or `Down`).
    pub direction: Direction,
    /// The triggering one-day return.
    pub ret: f64,
}

/// Chronological events remaining after cooldown thinning.
///
/// Consecutive events are more than `cooldown_days` calendar days apart when
/// the cooldown is positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSet(Vec<Event>);

impl EventSet {
    /// Events in chronological order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.0
    }

    /// Event dates in chronological order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.0.iter().map(|e| e.date)
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no event qualified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Event> for EventSet {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EventSet {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Every bar whose return qualifies, before cooldown thinning.
#[must_use]
pub fn qualifying_moves(series: &PriceSeries, threshold: f64, direction: Direction) -> Vec<Event> {
    series
        .bars()
        .iter()
        .filter_map(|bar| {
            let ret = bar.return1()?;
            direction.admits(ret, threshold).then(|| Event {
                date: bar.date,
                direction: Direction::of_return(ret),
                ret,
            })
        })
        .collect()
}

/// Greedy left-to-right cooldown filter.
///
/// An event is kept only if more than `cooldown_days` calendar days have
/// passed since the last kept event. The earliest bar of a cluster always
/// wins, even if a later bar in the cluster moved more.
#[must_use]
pub fn apply_cooldown(moves: Vec<Event>, cooldown_days: u32) -> EventSet {
    if cooldown_days == 0 {
        return EventSet(moves);
    }

    let mut last: Option<Date> = None;
    moves
        .into_iter()
        .filter(|e| {
            let keep = last.is_none_or(|l| (e.date - l).num_days() > i64::from(cooldown_days));
            if keep {
                last = Some(e.date);
            }
            keep
        })
        .collect()
}

/// Detect events in a price series.
///
/// A series with fewer than two bars has no defined returns and yields an
/// empty set.
///
/// # Errors
///
/// Returns `InvalidParameter` if the configuration is invalid.
///
/// # Example
///
/// ```
/// use ronda_event::{DetectorConfig, detect_events};
/// use ronda_traits::{Date, Direction, PriceSeries};
///
/// let start = Date::from_ymd_opt(2024, 1, 1).unwrap();
/// let series = PriceSeries::from_closes("NVDA", start, &[100.0, 94.0, 95.0]).unwrap();
/// let config = DetectorConfig { threshold: 0.05, direction: Direction::Down, cooldown_days: 0 };
///
/// let events = detect_events(&series, &config).unwrap();
/// assert_eq!(events.len(), 1);
/// ```
pub fn detect_events(series: &PriceSeries, config: &DetectorConfig) -> Result<EventSet> {
    config.validate()?;
    let moves = qualifying_moves(series, config.threshold, config.direction);
    Ok(apply_cooldown(moves, config.cooldown_days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn start() -> Date {
        Date::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn flat_then_event() -> PriceSeries {
        PriceSeries::from_closes(
            "TEST",
            start(),
            &[100.0, 100.0, 100.0, 95.0, 100.0, 105.0, 110.0, 120.0, 90.0, 95.0],
        )
        .unwrap()
    }

    fn config(threshold: f64, direction: Direction, cooldown_days: u32) -> DetectorConfig {
        DetectorConfig {
            threshold,
            direction,
            cooldown_days,
        }
    }

    #[test]
    fn test_down_moves_without_cooldown() {
        let series = flat_then_event();
        let events = detect_events(&series, &config(0.05, Direction::Down, 0)).unwrap();

        // 100 -> 95 and 120 -> 90
        assert_eq!(events.len(), 2);
        let first = events.events()[0];
        assert_eq!(first.date, series.bars()[3].date);
        assert_eq!(first.direction, Direction::Down);
        assert_relative_eq!(first.ret, -0.05, epsilon = 1e-12);
        assert_eq!(events.events()[1].date, series.bars()[8].date);
    }

    #[test]
    fn test_every_event_satisfies_threshold_and_sign() {
        let series = flat_then_event();
        for direction in [Direction::Up, Direction::Down, Direction::Both] {
            let events = detect_events(&series, &config(0.05, direction, 0)).unwrap();
            for e in &events {
                assert!(e.ret.abs() >= 0.05 - 1e-12);
                match direction {
                    Direction::Up => assert!(e.ret > 0.0),
                    Direction::Down => assert!(e.ret < 0.0),
                    Direction::Both => {}
                }
            }
        }
    }

    #[test]
    fn test_no_qualifying_bar_omitted_without_cooldown() {
        let series = flat_then_event();
        let events = detect_events(&series, &config(0.05, Direction::Both, 0)).unwrap();
        let expected = series
            .bars()
            .iter()
            .filter(|b| b.return1().is_some_and(|r| r.abs() >= 0.05))
            .count();
        assert_eq!(events.len(), expected);
    }

    #[test]
    fn test_both_is_union_of_up_and_down() {
        let series = flat_then_event();
        let up = detect_events(&series, &config(0.05, Direction::Up, 0)).unwrap();
        let down = detect_events(&series, &config(0.05, Direction::Down, 0)).unwrap();
        let both = detect_events(&series, &config(0.05, Direction::Both, 0)).unwrap();
        assert_eq!(both.len(), up.len() + down.len());
        assert!(both.events().windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_cooldown_keeps_earliest_in_cluster() {
        let series = flat_then_event();
        // Bars 3 and 8 are 7 calendar days apart; a 7-day cooldown drops bar 8
        // even though it is the larger move.
        let events = detect_events(&series, &config(0.05, Direction::Down, 7)).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events.events()[0].date, series.bars()[3].date);
    }

    #[test]
    fn test_cooldown_gap_must_exceed_not_equal() {
        let series = flat_then_event();
        let events = detect_events(&series, &config(0.05, Direction::Down, 6)).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_cooldown_invariant_on_kept_events() {
        let closes: Vec<f64> = (0..60)
            .map(|i| if i % 3 == 0 { 100.0 } else { 110.0 })
            .collect();
        let series = PriceSeries::from_closes("TEST", start(), &closes).unwrap();

        for cooldown in [1, 3, 5, 10] {
            let events = detect_events(&series, &config(0.05, Direction::Both, cooldown)).unwrap();
            assert!(!events.is_empty());
            for w in events.events().windows(2) {
                assert!((w[1].date - w[0].date).num_days() > i64::from(cooldown));
            }
        }
    }

    #[test]
    fn test_cooldown_only_removes_events() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + 10.0 * f64::from(i % 2)).collect();
        let series = PriceSeries::from_closes("TEST", start(), &closes).unwrap();
        let all = detect_events(&series, &config(0.05, Direction::Both, 0)).unwrap();
        let thinned = detect_events(&series, &config(0.05, Direction::Both, 4)).unwrap();

        assert!(thinned.len() < all.len());
        assert!(thinned.dates().all(|d| all.dates().any(|a| a == d)));
    }

    #[test]
    fn test_short_series_has_no_events() {
        let series = PriceSeries::from_closes("TEST", start(), &[100.0]).unwrap();
        let events = detect_events(&series, &config(0.0, Direction::Both, 0)).unwrap();
        assert!(events.is_empty());

        let empty = PriceSeries::empty("TEST");
        assert!(detect_events(&empty, &DetectorConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_threshold() {
        let series = flat_then_event();
        assert!(detect_events(&series, &config(-0.01, Direction::Up, 0)).is_err());
        assert!(detect_events(&series, &config(f64::NAN, Direction::Up, 0)).is_err());
    }
}
