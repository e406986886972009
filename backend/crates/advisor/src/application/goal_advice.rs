//! Goal Advice Use Case

use std::sync::Arc;

use platform::client::ClientKey;
use resilience::{GateRequest, Served};
use serde_json::{Value, json};

use super::config::AdvisorConfig;
use super::{AdvisorGate, generate_text};
use crate::domain::models::FinancialGoal;
use crate::domain::upstream::TextGenerator;
use crate::domain::{fallback, prompts};
use crate::error::AdvisorResult;

pub const OPERATION: &str = "goal_advice";

/// Advice for reaching a savings goal or paying off a loan
pub struct GoalAdviceUseCase<T>
where
    T: TextGenerator + Send + Sync,
{
    gate: Arc<AdvisorGate>,
    text: Arc<T>,
    config: Arc<AdvisorConfig>,
}

impl<T> GoalAdviceUseCase<T>
where
    T: TextGenerator + Send + Sync,
{
    pub fn new(gate: Arc<AdvisorGate>, text: Arc<T>, config: Arc<AdvisorConfig>) -> Self {
        Self { gate, text, config }
    }

    pub async fn execute(
        &self,
        client: &ClientKey,
        goal: FinancialGoal,
    ) -> AdvisorResult<Served<Value>> {
        goal.validate()?;

        let prompt = prompts::goal_advice(&goal);
        let request = GateRequest::new(client, OPERATION, &goal, self.config.ai_ttl)
            .with_fallback(|| json!({ "text": fallback::goal_summary(&goal) }));

        let outcome = self
            .gate
            .run(request, || generate_text(Arc::clone(&self.text), prompt.clone()))
            .await;

        Ok(outcome.into_result()?)
    }
}
