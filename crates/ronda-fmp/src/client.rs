//! FMP API client implementation.

use crate::{
    Result,
    error::FmpError,
    types::{EarningsRecord, HistoricalPrice, to_price_series},
};
use reqwest::Client;
use ronda_traits::{Date, EarningsCalendarProvider, PriceHistoryProvider, PriceSeries};
use std::env;
use tracing::debug;

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "RONDA_FMP_API_KEY";

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a new FMP client from the `RONDA_FMP_API_KEY` environment
    /// variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var(API_KEY_VAR).map_err(|_| FmpError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{FMP_BASE_URL}/{endpoint}&apikey={}", self.api_key)
        } else {
            format!("{FMP_BASE_URL}/{endpoint}?apikey={}", self.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        debug!(endpoint, "FMP request");
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;

        // Check for error responses
        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(FmpError::Api(text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Get daily end-of-day prices for a symbol, newest first.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol
    /// * `from` - Start date, inclusive
    /// * `to` - End date, inclusive
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        from: Option<Date>,
        to: Option<Date>,
    ) -> Result<Vec<HistoricalPrice>> {
        let mut endpoint = format!("historical-price-eod/full?symbol={}", symbol.to_uppercase());
        if let Some(f) = from {
            endpoint.push_str(&format!("&from={}", f.format("%Y-%m-%d")));
        }
        if let Some(t) = to {
            endpoint.push_str(&format!("&to={}", t.format("%Y-%m-%d")));
        }

        // The stable API returns a flat array, not a wrapped response
        self.get(&endpoint).await
    }

    /// Get a daily price series for a symbol, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `FmpError::NoData` when the API returns no prices at all.
    pub async fn price_series(
        &self,
        symbol: &str,
        from: Option<Date>,
        to: Option<Date>,
    ) -> Result<PriceSeries> {
        let prices = self.historical_prices(symbol, from, to).await?;
        if prices.is_empty() {
            return Err(FmpError::NoData(symbol.to_string()));
        }
        Ok(to_price_series(symbol, &prices)?)
    }

    /// Get past and upcoming earnings announcements for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol
    /// * `limit` - Maximum number of records
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn earnings(&self, symbol: &str, limit: usize) -> Result<Vec<EarningsRecord>> {
        let endpoint = format!("earnings?symbol={}&limit={limit}", symbol.to_uppercase());
        self.get(&endpoint).await
    }
}

impl PriceHistoryProvider for FmpClient {
    async fn daily_bars(
        &self,
        symbol: &str,
        start: Date,
        end: Option<Date>,
    ) -> ronda_traits::Result<PriceSeries> {
        Ok(self.price_series(symbol, Some(start), end).await?)
    }
}

impl EarningsCalendarProvider for FmpClient {
    async fn earnings_dates(&self, symbol: &str, limit: usize) -> ronda_traits::Result<Vec<Date>> {
        let records = self.earnings(symbol, limit).await?;
        Ok(records.iter().filter_map(EarningsRecord::parsed_date).collect())
    }
}
