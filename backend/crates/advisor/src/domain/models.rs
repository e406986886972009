//! Domain Models
//!
//! Shapes exchanged with the frontend. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, AdvisorResult};

/// A holding in the user's portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    /// Client-side identifier, left out of request fingerprints
    #[serde(default, skip_serializing)]
    pub id: String,
    pub ticker: String,
    pub name: String,
    pub shares: f64,
    pub avg_price: f64,
    pub current_price: f64,
}

impl PortfolioItem {
    pub fn market_value(&self) -> f64 {
        self.shares * self.current_price
    }

    pub fn cost_basis(&self) -> f64 {
        self.shares * self.avg_price
    }

    pub fn validate(&self) -> AdvisorResult<()> {
        require_finite("shares", self.shares)?;
        require_finite("avgPrice", self.avg_price)?;
        require_finite("currentPrice", self.current_price)
    }
}

/// A savings target, or a loan being paid down when `is_loan` is set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialGoal {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    #[serde(default)]
    pub is_loan: bool,
}

impl FinancialGoal {
    /// Share of the target reached, in percent, clamped to 0..=100
    pub fn progress_percent(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 100.0;
        }
        (self.current_amount / self.target_amount * 100.0).clamp(0.0, 100.0)
    }

    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    pub fn validate(&self) -> AdvisorResult<()> {
        if self.name.trim().is_empty() {
            return Err(AdvisorError::invalid("goal name must not be empty"));
        }
        require_finite("targetAmount", self.target_amount)?;
        require_finite("currentAmount", self.current_amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub category: String,
    /// `YYYY-MM-DD`
    pub date: String,
}

impl Expense {
    pub fn validate(&self) -> AdvisorResult<()> {
        require_finite("amount", self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub summary: String,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPart {
    pub text: String,
}

/// One turn of a conversation, in the `{role, parts: [{text}]}` layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub parts: Vec<ChatPart>,
}

impl ChatTurn {
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|part| part.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }

    pub fn char_count(&self) -> usize {
        self.parts.iter().map(|part| part.text.chars().count()).sum()
    }
}

pub(crate) fn require_finite(field: &str, value: f64) -> AdvisorResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AdvisorError::invalid(format!("{field} must be a finite number")))
    }
}
