//! Get Quotes Use Case

use std::collections::BTreeMap;
use std::sync::Arc;

use platform::client::ClientKey;
use resilience::error::{UpstreamError, UpstreamResult};
use resilience::{GateRequest, Served};
use serde_json::{Value, json};
use tokio::task::JoinSet;

use super::config::AdvisorConfig;
use super::{AdvisorGate, to_json};
use crate::domain::upstream::MarketData;
use crate::domain::value_objects::SymbolList;
use crate::error::AdvisorResult;

pub const OPERATION: &str = "quotes";

/// Latest prices for a set of symbols
pub struct GetQuotesUseCase<M>
where
    M: MarketData + Send + Sync + 'static,
{
    gate: Arc<AdvisorGate>,
    market: Arc<M>,
    config: Arc<AdvisorConfig>,
}

impl<M> GetQuotesUseCase<M>
where
    M: MarketData + Send + Sync + 'static,
{
    pub fn new(gate: Arc<AdvisorGate>, market: Arc<M>, config: Arc<AdvisorConfig>) -> Self {
        Self {
            gate,
            market,
            config,
        }
    }

    /// `symbols` is the raw comma-separated list from the query string
    pub async fn execute(&self, client: &ClientKey, symbols: &str) -> AdvisorResult<Served<Value>> {
        let symbols = SymbolList::parse(symbols, self.config.limits.max_symbols)?;

        let request = GateRequest::new(client, OPERATION, &symbols, self.config.quotes_ttl);
        let outcome = self
            .gate
            .run(request, || {
                fetch_quotes(Arc::clone(&self.market), symbols.clone())
            })
            .await;

        Ok(outcome.into_result()?)
    }
}

/// Symbols are fetched concurrently. Unknown symbols (404) are left out;
/// any other failure fails the attempt and aborts the remaining lookups.
async fn fetch_quotes<M>(market: Arc<M>, symbols: SymbolList) -> UpstreamResult<Value>
where
    M: MarketData + Send + Sync + 'static,
{
    let mut tasks = JoinSet::new();
    for symbol in symbols.as_slice() {
        let market = Arc::clone(&market);
        let symbol = symbol.clone();
        tasks.spawn(async move {
            let result = market.quote(&symbol).await;
            (symbol, result)
        });
    }

    let mut quotes = BTreeMap::new();
    while let Some(joined) = tasks.join_next().await {
        let (symbol, result) =
            joined.map_err(|e| UpstreamError::Transport(format!("quote task failed: {e}")))?;
        match result {
            Ok(quote) => {
                quotes.insert(symbol.as_str().to_string(), to_json(&quote)?);
            }
            Err(UpstreamError::Status { status: 404, .. }) => {
                tracing::debug!(symbol = %symbol, "Unknown symbol skipped");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(json!({ "quotes": quotes }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::upstream::{PricePoint, Quote};
    use crate::domain::value_objects::{CurrencyCode, HistoryRange, Symbol};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    /// Answers every quote after one second
    #[derive(Default)]
    struct SlowMarket {
        calls: AtomicU32,
    }

    impl MarketData for SlowMarket {
        async fn quote(&self, symbol: &Symbol) -> UpstreamResult<Quote> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_secs(1)).await;
            match symbol.as_str() {
                "NOPE" => Err(UpstreamError::Status {
                    status: 404,
                    body: String::new(),
                }),
                "DOWN" => Err(UpstreamError::Status {
                    status: 503,
                    body: String::new(),
                }),
                _ => Ok(Quote {
                    price: 10.0,
                    currency: "USD".to_string(),
                }),
            }
        }

        async fn history(
            &self,
            _symbol: &Symbol,
            _range: &HistoryRange,
        ) -> UpstreamResult<Vec<PricePoint>> {
            Ok(Vec::new())
        }

        async fn fx_rate(&self, _base: &CurrencyCode, _quote: &CurrencyCode) -> UpstreamResult<f64> {
            Ok(1.0)
        }
    }

    fn symbols(raw: &str) -> SymbolList {
        SymbolList::parse(raw, 50).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_quotes_are_fetched_concurrently() {
        let market = Arc::new(SlowMarket::default());
        let mut raw: Vec<String> = (1..=24).map(|i| format!("S{i}")).collect();
        raw.push("NOPE".to_string());

        let started = Instant::now();
        let value = fetch_quotes(Arc::clone(&market), symbols(&raw.join(",")))
            .await
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(market.calls.load(Ordering::SeqCst), 25);
        let quotes = value["quotes"].as_object().unwrap();
        assert_eq!(quotes.len(), 24);
        assert!(!quotes.contains_key("NOPE"));
        assert_eq!(quotes["S7"]["price"], 10.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quote_failure_fails_the_whole_attempt() {
        let market = Arc::new(SlowMarket::default());
        let result = fetch_quotes(market, symbols("AAPL,DOWN,MSFT")).await;
        assert!(matches!(
            result,
            Err(UpstreamError::Status { status: 503, .. })
        ));
    }
}
