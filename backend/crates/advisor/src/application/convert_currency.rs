//! Convert Currency Use Case

use std::sync::Arc;

use platform::client::ClientKey;
use resilience::error::{ResilienceError, UpstreamError, UpstreamResult};
use resilience::{GateRequest, Served, ServedFrom};
use serde::Serialize;
use serde_json::{Value, json};

use super::AdvisorGate;
use super::config::AdvisorConfig;
use crate::domain::fallback;
use crate::domain::upstream::MarketData;
use crate::domain::value_objects::CurrencyCode;
use crate::error::{AdvisorError, AdvisorResult};

/// Cached per currency pair; the amount is applied afterwards
pub const OPERATION: &str = "fx_rate";

/// Input DTO for convert currency
#[derive(Debug, Clone)]
pub struct ConvertCurrencyInput {
    pub amount: f64,
    pub base: String,
    pub quote: String,
}

#[derive(Debug, Clone, Serialize)]
struct PairKey {
    base: CurrencyCode,
    quote: CurrencyCode,
}

/// Convert an amount between two currencies
pub struct ConvertCurrencyUseCase<M>
where
    M: MarketData + Send + Sync,
{
    gate: Arc<AdvisorGate>,
    market: Arc<M>,
    config: Arc<AdvisorConfig>,
}

impl<M> ConvertCurrencyUseCase<M>
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

    /// Served from the reference table, marked `estimated`, when the source is down
    pub async fn execute(
        &self,
        client: &ClientKey,
        input: ConvertCurrencyInput,
    ) -> AdvisorResult<Served<Value>> {
        if !input.amount.is_finite() || input.amount < 0.0 {
            return Err(AdvisorError::invalid(
                "amount must be a finite, non-negative number",
            ));
        }
        let pair = PairKey {
            base: CurrencyCode::parse(&input.base)?,
            quote: CurrencyCode::parse(&input.quote)?,
        };

        let mut request = GateRequest::new(client, OPERATION, &pair, self.config.fx_ttl);
        if let Some(rate) = fallback::reference_rate(&pair.base, &pair.quote) {
            request = request.with_fallback(move || json!(rate));
        }

        let served = self
            .gate
            .run(request, || fetch_rate(Arc::clone(&self.market), pair.clone()))
            .await
            .into_result()?;

        let rate = served.value.as_f64().ok_or_else(|| {
            ResilienceError::Internal(format!("non-numeric rate for {OPERATION}"))
        })?;

        Ok(Served {
            value: json!({
                "amount": input.amount,
                "base": pair.base,
                "quote": pair.quote,
                "rate": rate,
                "converted": round_cents(input.amount * rate),
                "estimated": served.source == ServedFrom::Fallback,
            }),
            source: served.source,
        })
    }
}

async fn fetch_rate<M>(market: Arc<M>, pair: PairKey) -> UpstreamResult<Value>
where
    M: MarketData + Send + Sync,
{
    if pair.base == pair.quote {
        return Ok(json!(1.0));
    }
    let rate = market.fx_rate(&pair.base, &pair.quote).await?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(UpstreamError::Decode(format!(
            "implausible rate {rate} for {}/{}",
            pair.base, pair.quote
        )));
    }
    Ok(json!(rate))
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
