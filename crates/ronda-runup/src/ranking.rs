//! Ranking of lookbacks per ticker.
//!
//! Each surviving (ticker, lookback) summary is scored, the best lookback of
//! every ticker is kept, and the picks are ordered by score descending.

use crate::TickerYSummary;
use crate::frame::round_to;
use derive_more::Display;
use ronda_traits::{Result, RondaError, stats::MIN_STD_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a run-up summary is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMode {
    /// Mean run-up.
    #[display("avg")]
    Avg,
    /// Mean over standard deviation, falling back to the mean when the
    /// deviation is zero or undefined.
    #[default]
    #[display("sharpe")]
    Sharpe,
    /// Mean scaled by `0.5 + 0.5 * win_rate`.
    #[display("avg_with_win")]
    AvgWithWin,
}

impl ScoreMode {
    /// Score one summary row.
    #[must_use]
    pub fn score(self, summary: &TickerYSummary) -> f64 {
        let avg = summary.avg_runup_pct;
        match self {
            Self::Avg => avg,
            Self::AvgWithWin => avg * 0.5f64.mul_add(summary.win_rate, 0.5),
            Self::Sharpe => {
                let std = summary.std_runup_pct;
                if std.is_finite() && std > MIN_STD_THRESHOLD {
                    avg / std
                } else {
                    avg
                }
            }
        }
    }
}

impl FromStr for ScoreMode {
    type Err = RondaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "avg" => Ok(Self::Avg),
            "sharpe" => Ok(Self::Sharpe),
            "avg_with_win" => Ok(Self::AvgWithWin),
            other => Err(RondaError::InvalidParameter(format!(
                "unknown score mode '{other}' (expected avg, sharpe or avg_with_win)"
            ))),
        }
    }
}

/// Filters and scoring used to pick the best lookback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Minimum win rate in `[0, 1]`.
    pub min_win_rate: f64,
    /// Minimum number of run-ups behind a summary.
    pub min_samples: usize,
    /// Score function.
    pub score: ScoreMode,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            min_win_rate: 0.0,
            min_samples: 2,
            score: ScoreMode::Sharpe,
        }
    }
}

impl RankingConfig {
    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `min_win_rate` is outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_win_rate) {
            return Err(RondaError::InvalidParameter(format!(
                "min_win_rate must be in [0, 1], got {}",
                self.min_win_rate
            )));
        }
        Ok(())
    }

    // win rate is compared at the 3 decimals it is reported with
    fn admits(&self, summary: &TickerYSummary) -> bool {
        summary.samples >= self.min_samples && round_to(summary.win_rate, 3) >= self.min_win_rate
    }
}

/// The best lookback of one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPick {
    /// Winning summary row.
    pub summary: TickerYSummary,
    /// Its score.
    pub score: f64,
}

/// Pick the best lookback per ticker.
///
/// Tickers are considered in first-appearance order. Within a ticker the first
/// row with the maximal score wins. Tickers with no surviving rows are absent.
#[must_use]
pub fn pick_best(summaries: &[TickerYSummary], config: &RankingConfig) -> Vec<BestPick> {
    let mut picks: Vec<BestPick> = Vec::new();

    for summary in summaries.iter().filter(|s| config.admits(s)) {
        let score = config.score.score(summary);
        match picks.iter_mut().find(|p| p.summary.symbol == summary.symbol) {
            Some(best) if score > best.score => {
                *best = BestPick {
                    summary: summary.clone(),
                    score,
                };
            }
            Some(_) => {}
            None => picks.push(BestPick {
                summary: summary.clone(),
                score,
            }),
        }
    }

    picks.sort_by(|a, b| b.score.total_cmp(&a.score));
    picks
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn summary(symbol: &str, lookback: usize, avg: f64, std: f64, win: f64, n: usize) -> TickerYSummary {
        TickerYSummary {
            symbol: symbol.to_string(),
            earnings_count: 6,
            lookback,
            avg_runup_pct: avg,
            std_runup_pct: std,
            win_rate: win,
            samples: n,
        }
    }

    #[test]
    fn test_score_modes() {
        let s = summary("A", 5, 4.0, 2.0, 0.5, 4);
        assert_relative_eq!(ScoreMode::Avg.score(&s), 4.0);
        assert_relative_eq!(ScoreMode::Sharpe.score(&s), 2.0);
        assert_relative_eq!(ScoreMode::AvgWithWin.score(&s), 4.0 * 0.75);
    }

    #[test]
    fn test_sharpe_falls_back_on_zero_std() {
        let s = summary("A", 5, 3.5, 0.0, 1.0, 1);
        let score = ScoreMode::Sharpe.score(&s);
        assert!(score.is_finite());
        assert_relative_eq!(score, 3.5);

        let nan = summary("A", 5, -1.5, f64::NAN, 0.0, 1);
        assert_relative_eq!(ScoreMode::Sharpe.score(&nan), -1.5);
    }

    #[test]
    fn test_score_mode_parse_and_display() {
        assert_eq!("avg_with_win".parse::<ScoreMode>().unwrap(), ScoreMode::AvgWithWin);
        assert_eq!(" Sharpe ".parse::<ScoreMode>().unwrap(), ScoreMode::Sharpe);
        assert!("median".parse::<ScoreMode>().is_err());
        assert_eq!(ScoreMode::AvgWithWin.to_string(), "avg_with_win");
        assert_eq!(ScoreMode::default(), ScoreMode::Sharpe);
    }

    #[test]
    fn test_pick_best_per_ticker_sorted() {
        let rows = vec![
            summary("A", 5, 1.0, 1.0, 0.5, 4),
            summary("A", 10, 3.0, 1.0, 0.75, 4),
            summary("B", 5, 5.0, 1.0, 1.0, 4),
            summary("B", 10, 2.0, 1.0, 1.0, 4),
        ];
        let picks = pick_best(&rows, &RankingConfig::default());

        assert_eq!(picks.len(), 2);
        assert_eq!(picks[0].summary.symbol, "B");
        assert_eq!(picks[0].summary.lookback, 5);
        assert_eq!(picks[1].summary.symbol, "A");
        assert_eq!(picks[1].summary.lookback, 10);
    }

    #[test]
    fn test_pick_best_first_maximal_wins_ties() {
        let rows = vec![summary("A", 5, 2.0, 1.0, 1.0, 3), summary("A", 10, 2.0, 1.0, 1.0, 3)];
        let picks = pick_best(&rows, &RankingConfig::default());
        assert_eq!(picks[0].summary.lookback, 5);
    }

    #[test]
    fn test_pick_best_filters() {
        let rows = vec![
            summary("A", 5, 9.0, 1.0, 1.0, 1),  // too few samples
            summary("B", 5, 9.0, 1.0, 0.25, 5), // win rate too low
            summary("C", 5, 1.0, 1.0, 0.6, 5),
        ];
        let config = RankingConfig {
            min_win_rate: 0.5,
            ..Default::default()
        };
        let picks = pick_best(&rows, &config);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].summary.symbol, "C");
    }

    #[test]
    fn test_min_win_rate_uses_reported_precision() {
        let rows = vec![summary("A", 5, 1.0, 1.0, 2.0 / 3.0, 3)];
        let config = RankingConfig {
            min_win_rate: 0.667,
            ..Default::default()
        };
        assert_eq!(pick_best(&rows, &config).len(), 1);

        let strict = RankingConfig {
            min_win_rate: 0.668,
            ..Default::default()
        };
        assert!(pick_best(&rows, &strict).is_empty());
    }

    #[test]
    fn test_pick_best_empty() {
        assert!(pick_best(&[], &RankingConfig::default()).is_empty());
    }

    #[test]
    fn test_validate() {
        assert!(RankingConfig::default().validate().is_ok());
        let bad = RankingConfig {
            min_win_rate: 1.5,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
