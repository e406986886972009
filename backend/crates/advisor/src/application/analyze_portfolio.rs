//! Analyze Portfolio Use Case

use std::sync::Arc;

use platform::client::ClientKey;
use resilience::{GateRequest, Served};
use serde_json::{Value, json};

use super::config::AdvisorConfig;
use super::{AdvisorGate, generate_text};
use crate::domain::models::PortfolioItem;
use crate::domain::upstream::TextGenerator;
use crate::domain::{fallback, prompts};
use crate::error::{AdvisorError, AdvisorResult};

pub const OPERATION: &str = "analyze_portfolio";

/// Written analysis of a portfolio
pub struct AnalyzePortfolioUseCase<T>
where
    T: TextGenerator + Send + Sync,
{
    gate: Arc<AdvisorGate>,
    text: Arc<T>,
    config: Arc<AdvisorConfig>,
}

impl<T> AnalyzePortfolioUseCase<T>
where
    T: TextGenerator + Send + Sync,
{
    pub fn new(gate: Arc<AdvisorGate>, text: Arc<T>, config: Arc<AdvisorConfig>) -> Self {
        Self { gate, text, config }
    }

    pub async fn execute(
        &self,
        client: &ClientKey,
        portfolio: Vec<PortfolioItem>,
    ) -> AdvisorResult<Served<Value>> {
        let max = self.config.limits.max_portfolio_items;
        if portfolio.len() > max {
            return Err(AdvisorError::too_large(format!(
                "portfolio may hold at most {max} items"
            )));
        }
        for item in &portfolio {
            item.validate()?;
        }

        let prompt = prompts::analyze_portfolio(&portfolio);
        let request = GateRequest::new(client, OPERATION, &portfolio, self.config.ai_ttl)
            .with_fallback(|| json!({ "text": fallback::portfolio_summary(&portfolio) }));

        let outcome = self
            .gate
            .run(request, || generate_text(Arc::clone(&self.text), prompt.clone()))
            .await;

        Ok(outcome.into_result()?)
    }
}
