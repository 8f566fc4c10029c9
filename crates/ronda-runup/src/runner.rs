//! Fetch-and-compute drivers over the provider traits.

use crate::{
    EARNINGS_FETCH_LIMIT, RunupBatch, RunupConfig, TickerRunups, compute_ticker_runups,
    history_window, select_past_earnings,
};
use ronda_traits::{Date, EarningsCalendarProvider, PriceHistoryProvider, Result, RondaError};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Fetch data for one ticker and measure its run-ups.
///
/// A ticker without past earnings dates or without any price history yields
/// an empty result rather than an error.
///
/// # Errors
///
/// Returns the provider's error when a fetch fails for any other reason.
pub async fn run_ticker<P>(
    provider: &P,
    symbol: &str,
    config: &RunupConfig,
    today: Date,
) -> Result<TickerRunups>
where
    P: PriceHistoryProvider + EarningsCalendarProvider + Sync,
{
    let all_dates = provider.earnings_dates(symbol, EARNINGS_FETCH_LIMIT).await?;
    let earnings = select_past_earnings(&all_dates, today, config.earnings_count);
    let Some((start, end)) = history_window(&earnings, &config.lookbacks) else {
        debug!(symbol, "no past earnings dates");
        return Ok(TickerRunups::empty(symbol));
    };

    let series = match provider.daily_bars(symbol, start, Some(end)).await {
        Ok(series) => series,
        Err(RondaError::NoData(_)) => {
            debug!(symbol, %start, %end, "no price history");
            return Ok(TickerRunups::empty(symbol));
        }
        Err(e) => return Err(e),
    };

    Ok(compute_ticker_runups(&series, &earnings, config))
}

/// Run many tickers concurrently, one task each.
///
/// Results are folded in the order of `symbols`. A ticker whose fetch fails is
/// logged and contributes an empty result.
///
/// # Errors
///
/// Returns `InvalidParameter` if `config` is invalid.
pub async fn run_batch<P>(
    provider: P,
    symbols: &[String],
    config: &RunupConfig,
    today: Date,
) -> Result<RunupBatch>
where
    P: PriceHistoryProvider + EarningsCalendarProvider + Clone + Send + Sync + 'static,
{
    config.validate()?;

    let mut tasks = JoinSet::new();
    for (idx, symbol) in symbols.iter().enumerate() {
        let provider = provider.clone();
        let symbol = symbol.clone();
        let config = config.clone();
        tasks.spawn(async move {
            let result = match run_ticker(&provider, &symbol, &config, today).await {
                Ok(result) => {
                    info!(symbol = %symbol, rows = result.rows.len(), "ticker done");
                    result
                }
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "ticker failed");
                    TickerRunups::empty(symbol)
                }
            };
            (idx, result)
        });
    }

    let mut slots: Vec<Option<TickerRunups>> = vec![None; symbols.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((idx, result)) => slots[idx] = Some(result),
            Err(e) => warn!(error = %e, "ticker task aborted"),
        }
    }

    Ok(slots
        .into_iter()
        .zip(symbols)
        .map(|(slot, symbol)| slot.unwrap_or_else(|| TickerRunups::empty(symbol.as_str())))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ronda_traits::PriceSeries;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[derive(Clone, Default)]
    struct MockProvider {
        closes: Arc<HashMap<String, Vec<f64>>>,
        earnings: Arc<HashMap<String, Vec<Date>>>,
    }

    impl MockProvider {
        fn new(entries: &[(&str, Vec<f64>, Vec<Date>)]) -> Self {
            let mut closes = HashMap::new();
            let mut earnings = HashMap::new();
            for (symbol, c, e) in entries {
                closes.insert(symbol.to_string(), c.clone());
                earnings.insert(symbol.to_string(), e.clone());
            }
            Self {
                closes: Arc::new(closes),
                earnings: Arc::new(earnings),
            }
        }
    }

    impl PriceHistoryProvider for MockProvider {
        async fn daily_bars(
            &self,
            symbol: &str,
            start: Date,
            end: Option<Date>,
        ) -> Result<PriceSeries> {
            let closes = self
                .closes
                .get(symbol)
                .ok_or_else(|| RondaError::NoData(symbol.to_string()))?;
            let full = PriceSeries::from_closes(symbol, d(2024, 1, 1), closes)?;
            let bars = full
                .bars()
                .iter()
                .filter(|b| b.date >= start && end.is_none_or(|e| b.date <= e))
                .cloned()
                .collect();
            PriceSeries::new(symbol, bars)
        }
    }

    impl EarningsCalendarProvider for MockProvider {
        async fn earnings_dates(&self, symbol: &str, _limit: usize) -> Result<Vec<Date>> {
            match symbol {
                "FAIL" => Err(RondaError::DataFetch("provider down".to_string())),
                _ => Ok(self.earnings.get(symbol).cloned().unwrap_or_default()),
            }
        }
    }

    fn rising(n: i32) -> Vec<f64> {
        (0..n).map(|i| 100.0 + f64::from(i)).collect()
    }

    fn config() -> RunupConfig {
        RunupConfig {
            earnings_count: 6,
            lookbacks: ronda_traits::Horizons::new([3, 5]).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_run_ticker() {
        let provider = MockProvider::new(&[(
            "AAA",
            rising(40),
            vec![d(2024, 1, 22), d(2024, 2, 12), d(2030, 1, 1)],
        )]);
        let result = run_ticker(&provider, "AAA", &config(), d(2024, 6, 1))
            .await
            .unwrap();

        // Future date dropped; two anchors times two lookbacks
        assert_eq!(result.anchors.len(), 2);
        assert_eq!(result.rows.len(), 4);
        assert!(result.summaries.iter().all(|s| s.samples == 2));
    }

    #[tokio::test]
    async fn test_run_ticker_without_earnings_is_empty() {
        let provider = MockProvider::new(&[("AAA", rising(40), Vec::new())]);
        let result = run_ticker(&provider, "AAA", &config(), d(2024, 6, 1))
            .await
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.symbol, "AAA");
    }

    #[tokio::test]
    async fn test_run_ticker_without_prices_is_empty() {
        let provider = MockProvider::new(&[]);
        let provider = MockProvider {
            earnings: Arc::new(HashMap::from([("ZZZ".to_string(), vec![d(2024, 1, 22)])])),
            ..provider
        };
        let result = run_ticker(&provider, "ZZZ", &config(), d(2024, 6, 1))
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_run_batch_survives_failures_in_order() {
        let provider = MockProvider::new(&[
            ("AAA", rising(40), vec![d(2024, 1, 22)]),
            ("BBB", rising(40), vec![d(2024, 2, 12)]),
        ]);
        let symbols: Vec<String> = ["BBB", "FAIL", "AAA"].iter().map(|s| s.to_string()).collect();
        let batch = run_batch(provider, &symbols, &config(), d(2024, 6, 1))
            .await
            .unwrap();

        let order: Vec<&str> = batch.tickers().iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(order, ["BBB", "FAIL", "AAA"]);
        assert!(batch.tickers()[1].is_empty());
        assert_eq!(batch.grid().len(), 4);
    }

    #[tokio::test]
    async fn test_run_batch_rejects_invalid_config() {
        let bad = RunupConfig {
            earnings_count: 0,
            ..config()
        };
        assert!(run_batch(MockProvider::default(), &[], &bad, d(2024, 6, 1)).await.is_err());
    }
}
