//! Upstream Provider Traits
//!
//! Interfaces for the generative text service and the market data source.
//! Implementations are in the infrastructure layer.

use resilience::error::UpstreamResult;
use serde::Serialize;

use crate::domain::models::{ChatRole, ChatTurn};
use crate::domain::value_objects::{CurrencyCode, HistoryRange, Symbol};

/// One turn of prompt content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTurn {
    pub role: ChatRole,
    pub text: String,
}

/// Request for the text generator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextPrompt {
    pub system_instruction: Option<String>,
    pub contents: Vec<PromptTurn>,
}

impl TextPrompt {
    /// Single user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            contents: vec![PromptTurn {
                role: ChatRole::User,
                text: text.into(),
            }],
        }
    }

    /// Prior conversation followed by a new user message
    pub fn conversation(history: &[ChatTurn], new_message: &str) -> Self {
        let mut contents: Vec<PromptTurn> = history
            .iter()
            .map(|turn| PromptTurn {
                role: turn.role,
                text: turn.text(),
            })
            .collect();
        contents.push(PromptTurn {
            role: ChatRole::User,
            text: new_message.to_string(),
        });
        Self {
            system_instruction: None,
            contents,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }
}

/// Latest price of a symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub price: f64,
    pub currency: String,
}

/// One sample of a price series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    /// Unix seconds
    pub time: i64,
    /// `YYYY-MM-DD` (UTC)
    pub date: String,
    pub close: f64,
}

/// Generative text service
#[trait_variant::make(TextGenerator: Send)]
pub trait LocalTextGenerator {
    /// Generate a completion for `prompt`
    async fn generate(&self, prompt: &TextPrompt) -> UpstreamResult<String>;
}

/// Market data source
#[trait_variant::make(MarketData: Send)]
pub trait LocalMarketData {
    /// Latest quote for `symbol`
    async fn quote(&self, symbol: &Symbol) -> UpstreamResult<Quote>;

    /// Closing prices of `symbol` over `range`
    async fn history(&self, symbol: &Symbol, range: &HistoryRange)
    -> UpstreamResult<Vec<PricePoint>>;

    /// Units of `quote` per one unit of `base`
    async fn fx_rate(&self, base: &CurrencyCode, quote: &CurrencyCode) -> UpstreamResult<f64>;
}
