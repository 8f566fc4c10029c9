//! Best-effort parser for free-text event-study questions.
//!
//! Turns "What happens after a 7% down day on TSLA over the next 3 days?" into
//! a symbol, a percent threshold, a direction and a set of horizons. Missing
//! pieces stay `None`; deciding whether that is acceptable is the caller's job.

use regex::Regex;
use ronda_traits::{Direction, Horizons};
use serde::Serialize;
use std::collections::BTreeSet;

const UP_WORDS: &[&str] = &["up", "green", "rally", "rip", "spike", "pop", "gain", "pump"];
const DOWN_WORDS: &[&str] = &["down", "red", "dump", "selloff", "sell-off", "drop", "fall", "plunge"];
const NOT_SYMBOLS: &[&str] = &["AND", "FOR", "WITH", "THE"];

/// Structured form of a question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ParsedQuery {
    pub(crate) symbol: Option<String>,
    pub(crate) percent: Option<f64>,
    pub(crate) direction: Direction,
    pub(crate) horizons: Horizons,
}

/// Compiled patterns for [`QueryParser::parse`].
#[derive(Debug, Clone)]
pub(crate) struct QueryParser {
    percent: Regex,
    word: Regex,
    symbol: Regex,
    next_n: Regex,
}

impl QueryParser {
    pub(crate) fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            percent: Regex::new(r"(?:>=|≥|at least\s+)?(\d+(?:\.\d+)?)\s*%")?,
            word: Regex::new(r"[a-z]+(?:-[a-z]+)*")?,
            symbol: Regex::new(r"\$?\b([A-Z]{2,5})\b")?,
            next_n: Regex::new(r"next\s+(\d{1,3})\s*(?:days?|sessions?)\b")?,
        })
    }

    /// Parse `text`, falling back to `current_symbol` when no ticker is named.
    pub(crate) fn parse(&self, text: &str, current_symbol: Option<&str>) -> ParsedQuery {
        let low = text.to_lowercase();

        let percent = self
            .percent
            .captures(&low)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok());

        let words: BTreeSet<&str> = self.word.find_iter(&low).map(|m| m.as_str()).collect();
        let has_up = UP_WORDS.iter().any(|w| words.contains(w));
        let has_down = DOWN_WORDS.iter().any(|w| words.contains(w));
        let direction = match (has_up, has_down) {
            (true, false) => Direction::Up,
            (false, true) => Direction::Down,
            _ => Direction::Both,
        };

        let symbol = self
            .symbol
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .find(|s| !NOT_SYMBOLS.contains(s))
            .map(str::to_string)
            .or_else(|| current_symbol.map(str::to_uppercase));

        let mut horizons: BTreeSet<usize> = self
            .next_n
            .captures_iter(&low)
            .filter_map(|c| c.get(1)?.as_str().parse().ok())
            .filter(|&h| h > 0)
            .collect();
        if low.contains("next day") || words.contains("tomorrow") {
            horizons.insert(1);
        }
        if low.contains("next week") {
            horizons.insert(5);
        }
        let horizons = if horizons.is_empty() {
            Horizons::standard()
        } else {
            Horizons::new(horizons).unwrap_or_default()
        };

        ParsedQuery {
            symbol,
            percent,
            direction,
            horizons,
        }
    }
}
