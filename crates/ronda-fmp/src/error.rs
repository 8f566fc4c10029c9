//! Error types for the FMP client.

use ronda_traits::RondaError;
use thiserror::Error;

/// Errors that can occur when using the FMP API.
#[derive(Debug, Error)]
pub enum FmpError {
    /// Missing API key.
    #[error("RONDA_FMP_API_KEY environment variable not set")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error.
    #[error("FMP API error: {0}")]
    Api(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// No data available.
    #[error("No data available for {0}")]
    NoData(String),

    /// Bars could not be assembled into a series.
    #[error("Invalid series: {0}")]
    Series(#[from] RondaError),
}

impl From<FmpError> for RondaError {
    fn from(err: FmpError) -> Self {
        match err {
            FmpError::NoData(symbol) => Self::NoData(symbol),
            FmpError::Series(inner) => inner,
            other => Self::DataFetch(other.to_string()),
        }
    }
}
