//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::chat::ChatInput;
use crate::application::convert_currency::ConvertCurrencyInput;
use crate::application::expense_advice::ExpenseAdviceInput;
use crate::application::get_history::GetHistoryInput;
use crate::domain::models::{ChatTurn, Expense, FinancialGoal, PortfolioItem};

/// Response for GET /
#[derive(Debug, Clone, Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
}

/// Response for GET /api/health
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache_entries: usize,
    pub tracked_clients: usize,
}

/// Query for GET /api/quotes
#[derive(Debug, Clone, Deserialize)]
pub struct QuotesQuery {
    #[serde(default)]
    pub symbols: String,
}

/// Query for GET /api/history
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub symbol: String,
    pub period: Option<String>,
    pub interval: Option<String>,
}

impl From<HistoryQuery> for GetHistoryInput {
    fn from(query: HistoryQuery) -> Self {
        Self {
            symbol: query.symbol,
            period: query.period,
            interval: query.interval,
        }
    }
}

/// Query for GET /api/convert
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertQuery {
    pub amount: f64,
    pub base: Option<String>,
    pub quote: Option<String>,
}

impl From<ConvertQuery> for ConvertCurrencyInput {
    fn from(query: ConvertQuery) -> Self {
        Self {
            amount: query.amount,
            base: query.base.unwrap_or_else(|| "USD".to_string()),
            quote: query.quote.unwrap_or_else(|| "INR".to_string()),
        }
    }
}

/// Query for GET /api/ai/news
#[derive(Debug, Clone, Deserialize)]
pub struct NewsQuery {
    pub topic: Option<String>,
}

/// Request for POST /api/ai/analyze-portfolio
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzePortfolioRequest {
    pub portfolio: Vec<PortfolioItem>,
}

/// Request for POST /api/ai/goal-advice
#[derive(Debug, Clone, Deserialize)]
pub struct GoalAdviceRequest {
    pub goal: FinancialGoal,
}

/// Request for POST /api/ai/expense-advice
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseAdviceRequest {
    #[serde(default)]
    pub monthly_expenses: Vec<Expense>,
    #[serde(default)]
    pub goals: Vec<FinancialGoal>,
    pub monthly_income: f64,
}

impl From<ExpenseAdviceRequest> for ExpenseAdviceInput {
    fn from(req: ExpenseAdviceRequest) -> Self {
        Self {
            monthly_expenses: req.monthly_expenses,
            goals: req.goals,
            monthly_income: req.monthly_income,
        }
    }
}

/// Request for POST /api/ai/chat
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    pub new_message: String,
    #[serde(default)]
    pub system_instruction: Option<String>,
}

impl From<ChatRequest> for ChatInput {
    fn from(req: ChatRequest) -> Self {
        Self {
            history: req.history,
            new_message: req.new_message,
            system_instruction: req.system_instruction.filter(|s| !s.trim().is_empty()),
        }
    }
}
