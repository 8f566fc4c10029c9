//! Statistical utility functions for return distributions.
//!
//! Every statistic returns `Option<f64>`: `None` means undefined (no samples,
//! or a single sample for the standard deviation), which keeps "zero" and
//! "missing" distinct at the type level. Non-finite inputs are ignored.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Minimum threshold for standard deviation to avoid division by zero.
/// Values below this threshold are treated as zero variance.
pub const MIN_STD_THRESHOLD: f64 = 1e-10;

/// Copy out the finite values.
#[must_use]
pub fn finite(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|x| x.is_finite()).collect()
}

/// Arithmetic mean of the finite values.
///
/// # Examples
///
/// ```
/// use ronda_traits::stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    let values = finite(values);
    ArrayView1::from(&values).mean()
}

/// Sample standard deviation (N-1 denominator) of the finite values.
///
/// Undefined for fewer than two samples.
#[must_use]
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let values = finite(values);
    if values.len() < 2 {
        return None;
    }
    Some(ArrayView1::from(&values).std(1.0))
}

/// Fraction of finite values strictly greater than zero.
///
/// A zero return is not a win.
#[must_use]
pub fn win_rate(values: &[f64]) -> Option<f64> {
    let values = finite(values);
    if values.is_empty() {
        return None;
    }
    let wins = values.iter().filter(|&&x| x > 0.0).count();
    Some(wins as f64 / values.len() as f64)
}

/// Percentile of an ascending-sorted slice using linear interpolation between
/// closest ranks.
///
/// `pct` is in `[0, 100]`. Matches the default method of common numeric
/// libraries: the rank is `pct / 100 * (n - 1)`.
#[must_use]
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&pct) {
        return None;
    }

    let n = sorted.len();
    let idx = pct / 100.0 * (n - 1) as f64;
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;

    if upper >= n || lower == upper {
        return Some(sorted[lower.min(n - 1)]);
    }
    let frac = idx - lower as f64;
    Some(sorted[lower] * (1.0 - frac) + sorted[upper] * frac)
}

/// Percentile of unsorted values. See [`percentile_sorted`].
#[must_use]
pub fn percentile(values: &[f64], pct: f64) -> Option<f64> {
    let mut sorted = finite(values);
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, pct)
}

/// Median of the finite values.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    percentile(values, 50.0)
}

/// Descriptive statistics of one return distribution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Describe {
    /// Number of finite samples.
    pub n: usize,
    /// Mean.
    pub mean: Option<f64>,
    /// Median.
    pub median: Option<f64>,
    /// Sample standard deviation; `None` when `n <= 1`.
    pub std: Option<f64>,
    /// Fraction of samples strictly above zero.
    pub win_rate: Option<f64>,
    /// Minimum.
    pub min: Option<f64>,
    /// 5th percentile.
    pub p5: Option<f64>,
    /// 25th percentile.
    pub p25: Option<f64>,
    /// 75th percentile.
    pub p75: Option<f64>,
    /// 95th percentile.
    pub p95: Option<f64>,
    /// Maximum.
    pub max: Option<f64>,
}

impl Describe {
    /// Summarize a sample. Non-finite values are dropped first.
    ///
    /// # Examples
    ///
    /// ```
    /// use ronda_traits::stats::Describe;
    ///
    /// let d = Describe::of(&[0.02, -0.01, 0.03]);
    /// assert_eq!(d.n, 3);
    /// assert!(d.std.is_some());
    ///
    /// let empty = Describe::of(&[]);
    /// assert_eq!(empty.n, 0);
    /// assert!(empty.mean.is_none());
    /// ```
    #[must_use]
    pub fn of(values: &[f64]) -> Self {
        let mut sorted = finite(values);
        if sorted.is_empty() {
            return Self::default();
        }
        sorted.sort_by(f64::total_cmp);

        let q = |pct| percentile_sorted(&sorted, pct);

        Self {
            n: sorted.len(),
            mean: mean(&sorted),
            median: q(50.0),
            std: sample_std(&sorted),
            win_rate: win_rate(&sorted),
            min: sorted.first().copied(),
            p5: q(5.0),
            p25: q(25.0),
            p75: q(75.0),
            p95: q(95.0),
            max: sorted.last().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_ignores_nan() {
        assert_relative_eq!(mean(&[1.0, f64::NAN, 3.0]).unwrap(), 2.0);
        assert!(mean(&[f64::NAN]).is_none());
    }

    #[test]
    fn test_sample_std_uses_bessel_correction() {
        let std = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        // Population std is 2.0; sample std is sqrt(32 / 7)
        assert_relative_eq!(std, (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_sample_std_single_value_undefined() {
        assert!(sample_std(&[0.5]).is_none());
        assert!(sample_std(&[]).is_none());
    }

    #[test]
    fn test_win_rate_zero_is_not_a_win() {
        assert_relative_eq!(win_rate(&[0.0, 0.1, -0.1, 0.2]).unwrap(), 0.5);
        assert!(win_rate(&[]).is_none());
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let vals: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_relative_eq!(percentile(&vals, 50.0).unwrap(), 5.5);
        assert_relative_eq!(percentile(&vals, 0.0).unwrap(), 1.0);
        assert_relative_eq!(percentile(&vals, 100.0).unwrap(), 10.0);
        // rank = 0.05 * 9 = 0.45
        assert_relative_eq!(percentile(&vals, 5.0).unwrap(), 1.45, epsilon = 1e-12);
        assert_relative_eq!(percentile(&vals, 25.0).unwrap(), 3.25, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_unsorted_input() {
        assert_relative_eq!(percentile(&[3.0, 1.0, 2.0], 50.0).unwrap(), 2.0);
    }

    #[test]
    fn test_percentile_out_of_range() {
        assert!(percentile(&[1.0], 101.0).is_none());
        assert!(percentile(&[], 50.0).is_none());
    }

    #[test]
    fn test_median_even_count() {
        assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_describe_single_value() {
        let d = Describe::of(&[0.1]);
        assert_eq!(d.n, 1);
        assert!(d.std.is_none());
        assert_eq!(d.win_rate, Some(1.0));
        assert_eq!(d.p5, Some(0.1));
        assert_eq!(d.p95, Some(0.1));
    }

    #[test]
    fn test_describe_single_loss() {
        let d = Describe::of(&[-0.1]);
        assert_eq!(d.win_rate, Some(0.0));
    }

    #[test]
    fn test_describe_empty_all_undefined() {
        let d = Describe::of(&[]);
        assert_eq!(d, Describe::default());
        assert!(d.median.is_none());
        assert!(d.win_rate.is_none());
        assert!(d.max.is_none());
    }

    #[test]
    fn test_describe_full() {
        let d = Describe::of(&[0.04, -0.02, 0.01, 0.03, f64::NAN]);
        assert_eq!(d.n, 4);
        assert_relative_eq!(d.mean.unwrap(), 0.015, epsilon = 1e-12);
        assert_relative_eq!(d.median.unwrap(), 0.02, epsilon = 1e-12);
        assert_eq!(d.min, Some(-0.02));
        assert_eq!(d.max, Some(0.04));
        assert_relative_eq!(d.win_rate.unwrap(), 0.75);
    }
}
