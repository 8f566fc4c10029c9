//! End-to-end event study over one price series.

use crate::{
    DetectorConfig, EventRow, EventSet, ForwardOutcome, SummaryRow, detect_events, event_table,
    forward_returns, summarize,
};
use ronda_traits::{Direction, Horizons, PriceSeries, Result};
use serde::{Deserialize, Serialize};

/// Parameters of an event study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventStudyConfig {
    /// Minimum absolute one-day move, as a fraction (0.05 = 5%).
    pub threshold: f64,
    /// Which moves qualify.
    pub direction: Direction,
    /// Calendar-day cooldown between kept events.
    pub cooldown_days: u32,
    /// Forward horizons in trading days.
    pub horizons: Horizons,
}

impl Default for EventStudyConfig {
    fn default() -> Self {
        let detector = DetectorConfig::default();
        Self {
            threshold: detector.threshold,
            direction: detector.direction,
            cooldown_days: detector.cooldown_days,
            horizons: Horizons::standard(),
        }
    }
}

impl EventStudyConfig {
    /// Build a config from a threshold given in percent (5.0 = 5%).
    #[must_use]
    pub fn from_percent(percent: f64, direction: Direction) -> Self {
        Self {
            threshold: percent / 100.0,
            direction,
            ..Default::default()
        }
    }

    /// Detector part of the configuration.
    #[must_use]
    pub const fn detector(&self) -> DetectorConfig {
        DetectorConfig {
            threshold: self.threshold,
            direction: self.direction,
            cooldown_days: self.cooldown_days,
        }
    }
}

/// Everything an event study produces for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventStudyReport {
    /// Symbol studied.
    pub symbol: String,
    /// Parameters used.
    pub config: EventStudyConfig,
    /// Kept events.
    pub events: EventSet,
    /// Forward returns per event.
    pub outcomes: Vec<ForwardOutcome>,
    /// Per-horizon statistics.
    pub summary: Vec<SummaryRow>,
    /// Per-event details.
    pub table: Vec<EventRow>,
}

impl EventStudyReport {
    /// Number of kept events.
    #[must_use]
    pub fn sample(&self) -> usize {
        self.events.len()
    }
}

/// Runs detection, forward returns and summaries in one pass.
#[derive(Debug, Clone, Default)]
pub struct EventStudy {
    config: EventStudyConfig,
}

impl EventStudy {
    /// Create a study with the given parameters.
    #[must_use]
    pub const fn new(config: EventStudyConfig) -> Self {
        Self { config }
    }

    /// Parameters of this study.
    #[must_use]
    pub const fn config(&self) -> &EventStudyConfig {
        &self.config
    }

    /// Run the study. An empty series yields an empty report.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the configuration is invalid.
    pub fn run(&self, series: &PriceSeries) -> Result<EventStudyReport> {
        let events = detect_events(series, &self.config.detector())?;
        let outcomes = forward_returns(series, &events, &self.config.horizons);
        let summary = summarize(&outcomes, &self.config.horizons);
        let table = event_table(series, &events);

        Ok(EventStudyReport {
            symbol: series.symbol().to_string(),
            config: self.config.clone(),
            events,
            outcomes,
            summary,
            table,
        })
    }
}
