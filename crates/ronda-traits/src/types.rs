//! Common types used throughout the Ronda toolkit.

use crate::{Result, RondaError};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier, typically a ticker like "NVDA".
pub type Symbol = String;

/// Direction of a one-day move.
///
/// `Up` and `Down` are also used to tag individual events with the sign of
/// their triggering return; `Both` only appears as a detector request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Return at or above `+threshold`.
    #[display("up")]
    Up,
    /// Return at or below `-threshold`.
    #[display("down")]
    Down,
    /// Union of `Up` and `Down`.
    #[default]
    #[display("both")]
    Both,
}

impl Direction {
    /// Whether a one-day return qualifies under this direction.
    #[must_use]
    pub fn admits(self, ret: f64, threshold: f64) -> bool {
        let up = ret >= threshold;
        let down = ret <= -threshold;
        match self {
            Self::Up => up,
            Self::Down => down,
            Self::Both => up || down,
        }
    }

    /// Sign of a single return as `Up` (non-negative) or `Down`.
    #[must_use]
    pub fn of_return(ret: f64) -> Self {
        if ret >= 0.0 { Self::Up } else { Self::Down }
    }
}

impl FromStr for Direction {
    type Err = RondaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "both" => Ok(Self::Both),
            other => Err(RondaError::InvalidParameter(format!(
                "Unknown direction '{other}'. Use: up, down, or both"
            ))),
        }
    }
}

/// Sorted, duplicate-free set of positive trading-day offsets.
///
/// Used both for forward-return horizons and run-up lookbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Horizons(Vec<usize>);

impl Horizons {
    /// Build from any collection of offsets. Duplicates are dropped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if any offset is zero.
    pub fn new(values: impl IntoIterator<Item = usize>) -> Result<Self> {
        let mut values: Vec<usize> = values.into_iter().collect();
        if values.contains(&0) {
            return Err(RondaError::InvalidParameter(
                "Horizons must be positive trading-day counts".to_string(),
            ));
        }
        values.sort_unstable();
        values.dedup();
        Ok(Self(values))
    }

    /// The offsets, ascending.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Iterate over the offsets, ascending.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Largest offset, if any.
    #[must_use]
    pub fn max(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Number of distinct offsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no offsets are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Forward-return horizons used when none are requested (1, 3, 5, 10, 20).
    #[must_use]
    pub fn standard() -> Self {
        Self(vec![1, 3, 5, 10, 20])
    }
}

impl Default for Horizons {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<usize>> for Horizons {
    type Error = RondaError;

    fn try_from(values: Vec<usize>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<Horizons> for Vec<usize> {
    fn from(h: Horizons) -> Self {
        h.0
    }
}

impl FromStr for Horizons {
    type Err = RondaError;

    /// Parse a comma-separated list such as `"1,3,5"`. Blank items are skipped.
    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                p.parse::<usize>().map_err(|e| {
                    RondaError::InvalidParameter(format!("Invalid horizon '{p}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(values)
    }
}
