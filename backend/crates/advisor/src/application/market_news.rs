//! Market News Use Case

use std::sync::Arc;

use platform::client::ClientKey;
use resilience::error::UpstreamResult;
use resilience::{GateRequest, Served};
use serde_json::{Value, json};

use super::config::AdvisorConfig;
use super::{AdvisorGate, to_json};
use crate::domain::upstream::{TextGenerator, TextPrompt};
use crate::domain::{prompts, services};
use crate::error::{AdvisorError, AdvisorResult};

pub const OPERATION: &str = "market_news";

/// Topic used when the client sends none
pub const DEFAULT_TOPIC: &str = "Indian and global stock markets";

/// Recent headlines on a topic, generated as a JSON array
pub struct MarketNewsUseCase<T>
where
    T: TextGenerator + Send + Sync,
{
    gate: Arc<AdvisorGate>,
    text: Arc<T>,
    config: Arc<AdvisorConfig>,
}

impl<T> MarketNewsUseCase<T>
where
    T: TextGenerator + Send + Sync,
{
    pub fn new(gate: Arc<AdvisorGate>, text: Arc<T>, config: Arc<AdvisorConfig>) -> Self {
        Self { gate, text, config }
    }

    /// Falls back to an empty article list when generation keeps failing
    pub async fn execute(
        &self,
        client: &ClientKey,
        topic: Option<&str>,
    ) -> AdvisorResult<Served<Value>> {
        let topic = topic.unwrap_or(DEFAULT_TOPIC).trim();
        let max = self.config.limits.max_topic_chars;
        let length = topic.chars().count();
        if length == 0 || length > max {
            return Err(AdvisorError::invalid(format!(
                "topic must be 1 to {max} characters"
            )));
        }

        let prompt = prompts::market_news(topic);
        let payload = json!({ "topic": topic });
        let request = GateRequest::new(client, OPERATION, &payload, self.config.news_ttl)
            .with_fallback(|| json!({ "articles": [] }));

        let outcome = self
            .gate
            .run(request, || fetch_articles(Arc::clone(&self.text), prompt.clone()))
            .await;

        Ok(outcome.into_result()?)
    }
}

/// A response that does not parse counts as a failed attempt
async fn fetch_articles<T>(text: Arc<T>, prompt: TextPrompt) -> UpstreamResult<Value>
where
    T: TextGenerator + Send + Sync,
{
    let generated = text.generate(&prompt).await?;
    let articles = services::parse_articles(&generated)?;
    Ok(json!({ "articles": to_json(&articles)? }))
}
