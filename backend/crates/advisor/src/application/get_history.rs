//! Get History Use Case

use std::sync::Arc;

use platform::client::ClientKey;
use resilience::error::UpstreamResult;
use resilience::{GateRequest, Served};
use serde::Serialize;
use serde_json::{Value, json};

use super::config::AdvisorConfig;
use super::{AdvisorGate, to_json};
use crate::domain::upstream::MarketData;
use crate::domain::value_objects::{HistoryRange, Symbol};
use crate::error::AdvisorResult;

pub const OPERATION: &str = "history";

/// Input DTO for get history
#[derive(Debug, Clone)]
pub struct GetHistoryInput {
    pub symbol: String,
    pub period: Option<String>,
    pub interval: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct HistoryKey {
    symbol: Symbol,
    #[serde(flatten)]
    range: HistoryRange,
}

/// Closing price series for one symbol
pub struct GetHistoryUseCase<M>
where
    M: MarketData + Send + Sync,
{
    gate: Arc<AdvisorGate>,
    market: Arc<M>,
    config: Arc<AdvisorConfig>,
}

impl<M> GetHistoryUseCase<M>
where
    M: MarketData + Send + Sync,
{
    pub fn new(gate: Arc<AdvisorGate>, market: Arc<M>, config: Arc<AdvisorConfig>) -> Self {
        Self {
            gate,
            market,
            config,
        }
    }

    pub async fn execute(
        &self,
        client: &ClientKey,
        input: GetHistoryInput,
    ) -> AdvisorResult<Served<Value>> {
        let key = HistoryKey {
            symbol: Symbol::parse(&input.symbol)?,
            range: HistoryRange::parse(input.period.as_deref(), input.interval.as_deref())?,
        };

        let request = GateRequest::new(client, OPERATION, &key, self.config.history_ttl);
        let outcome = self
            .gate
            .run(request, || {
                fetch_history(Arc::clone(&self.market), key.clone())
            })
            .await;

        Ok(outcome.into_result()?)
    }
}

async fn fetch_history<M>(market: Arc<M>, key: HistoryKey) -> UpstreamResult<Value>
where
    M: MarketData + Send + Sync,
{
    let series = market.history(&key.symbol, &key.range).await?;
    Ok(json!({
        "symbol": key.symbol,
        "period": key.range.period,
        "interval": key.range.interval,
        "series": to_json(&series)?,
    }))
}
