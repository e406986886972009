//! Application Layer
//!
//! One use case per endpoint. Each validates its input, then runs the
//! upstream call through the shared request gate.

use std::sync::Arc;

use resilience::error::{UpstreamError, UpstreamResult};
use resilience::{MemoryResponseCache, RequestGate, SlidingWindowRateLimiter};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::upstream::{TextGenerator, TextPrompt};

pub mod analyze_portfolio;
pub mod chat;
pub mod config;
pub mod convert_currency;
pub mod expense_advice;
pub mod get_history;
pub mod get_quotes;
pub mod goal_advice;
pub mod market_news;

/// Gate shared by every endpoint; cached values are response JSON
pub type AdvisorGate = RequestGate<SlidingWindowRateLimiter, MemoryResponseCache<Value>, Value>;

pub(crate) fn to_json<T: Serialize>(value: &T) -> UpstreamResult<Value> {
    serde_json::to_value(value).map_err(|e| UpstreamError::Decode(e.to_string()))
}

/// Generate text and wrap it as `{"text": ...}`
pub(crate) async fn generate_text<T>(text: Arc<T>, prompt: TextPrompt) -> UpstreamResult<Value>
where
    T: TextGenerator + Send + Sync,
{
    let generated = text.generate(&prompt).await?;
    Ok(json!({ "text": generated }))
}
