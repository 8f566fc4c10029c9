//! Error types for the Ronda toolkit.
//!
//! Alignment failures (no bar before a date, too little history for a horizon)
//! are not errors: they surface as `None` or as missing outcomes. The variants
//! below cover invalid parameters, malformed input data and collaborator
//! failures.

use thiserror::Error;

/// The main error type for Ronda operations.
#[derive(Debug, Error)]
pub enum RondaError {
    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A study parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error when a required column is missing from the data.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// The data provider has no history at all for a symbol.
    #[error("No data for {0}")]
    NoData(String),

    /// Error when a date is out of range or invalid.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error fetching data from external sources.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// I/O error while reading or writing local files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for RondaError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for RondaError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Ronda operations.
pub type Result<T> = std::result::Result<T, RondaError>;
