//! Expense Advice Use Case

use std::sync::Arc;

use platform::client::ClientKey;
use resilience::{GateRequest, Served};
use serde::Serialize;
use serde_json::{Value, json};

use super::config::AdvisorConfig;
use super::{AdvisorGate, generate_text};
use crate::domain::models::{Expense, FinancialGoal, require_finite};
use crate::domain::upstream::TextGenerator;
use crate::domain::{fallback, prompts};
use crate::error::{AdvisorError, AdvisorResult};

pub const OPERATION: &str = "expense_advice";

/// Input DTO for expense advice; also the cache fingerprint payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseAdviceInput {
    pub monthly_expenses: Vec<Expense>,
    pub goals: Vec<FinancialGoal>,
    pub monthly_income: f64,
}

/// Spending review against income and goals
pub struct ExpenseAdviceUseCase<T>
where
    T: TextGenerator + Send + Sync,
{
    gate: Arc<AdvisorGate>,
    text: Arc<T>,
    config: Arc<AdvisorConfig>,
}

impl<T> ExpenseAdviceUseCase<T>
where
    T: TextGenerator + Send + Sync,
{
    pub fn new(gate: Arc<AdvisorGate>, text: Arc<T>, config: Arc<AdvisorConfig>) -> Self {
        Self { gate, text, config }
    }

    pub async fn execute(
        &self,
        client: &ClientKey,
        input: ExpenseAdviceInput,
    ) -> AdvisorResult<Served<Value>> {
        self.validate(&input)?;

        let prompt = prompts::expense_advice(
            &input.monthly_expenses,
            &input.goals,
            input.monthly_income,
        );
        let request = GateRequest::new(client, OPERATION, &input, self.config.ai_ttl)
            .with_fallback(|| {
                json!({
                    "text": fallback::expense_summary(
                        &input.monthly_expenses,
                        &input.goals,
                        input.monthly_income,
                    )
                })
            });

        let outcome = self
            .gate
            .run(request, || generate_text(Arc::clone(&self.text), prompt.clone()))
            .await;

        Ok(outcome.into_result()?)
    }

    fn validate(&self, input: &ExpenseAdviceInput) -> AdvisorResult<()> {
        let limits = &self.config.limits;
        if input.monthly_expenses.len() > limits.max_expenses {
            return Err(AdvisorError::too_large(format!(
                "at most {} expenses per request",
                limits.max_expenses
            )));
        }
        if input.goals.len() > limits.max_goals {
            return Err(AdvisorError::too_large(format!(
                "at most {} goals per request",
                limits.max_goals
            )));
        }
        require_finite("monthlyIncome", input.monthly_income)?;
        if input.monthly_income < 0.0 {
            return Err(AdvisorError::invalid("monthlyIncome must not be negative"));
        }
        for expense in &input.monthly_expenses {
            expense.validate()?;
        }
        for goal in &input.goals {
            goal.validate()?;
        }
        Ok(())
    }
}
