//! Application Configuration
//!
//! Cache lifetimes and input limits for the advisor endpoints.

use std::time::Duration;

use platform::config::{env_or, env_secs};

/// Caps on request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLimits {
    pub max_symbols: usize,
    pub max_portfolio_items: usize,
    pub max_expenses: usize,
    pub max_goals: usize,
    pub max_chat_turns: usize,
    /// Per chat message and system instruction, in characters
    pub max_message_chars: usize,
    pub max_topic_chars: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_symbols: 25,
            max_portfolio_items: 200,
            max_expenses: 500,
            max_goals: 50,
            max_chat_turns: 50,
            max_message_chars: 4000,
            max_topic_chars: 200,
        }
    }
}

/// Advisor application configuration
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub quotes_ttl: Duration,
    pub history_ttl: Duration,
    pub fx_ttl: Duration,
    /// Portfolio, goal and expense advice
    pub ai_ttl: Duration,
    pub news_ttl: Duration,
    pub chat_ttl: Duration,
    /// Request bodies above this size are rejected with 413
    pub max_body_bytes: usize,
    pub limits: InputLimits,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            quotes_ttl: Duration::from_secs(30),
            history_ttl: Duration::from_secs(300),
            fx_ttl: Duration::from_secs(300),
            ai_ttl: Duration::from_secs(300),
            news_ttl: Duration::from_secs(120),
            chat_ttl: Duration::from_secs(120),
            max_body_bytes: 1024 * 1024,
            limits: InputLimits::default(),
        }
    }
}

impl AdvisorConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            quotes_ttl: env_secs("QUOTES_TTL_SECS", defaults.quotes_ttl),
            history_ttl: env_secs("HISTORY_TTL_SECS", defaults.history_ttl),
            fx_ttl: env_secs("FX_TTL_SECS", defaults.fx_ttl),
            ai_ttl: env_secs("AI_TTL_SECS", defaults.ai_ttl),
            news_ttl: env_secs("NEWS_TTL_SECS", defaults.news_ttl),
            chat_ttl: env_secs("CHAT_TTL_SECS", defaults.chat_ttl),
            max_body_bytes: env_or("MAX_BODY_BYTES", defaults.max_body_bytes),
            limits: defaults.limits,
        }
    }

    /// Largest TTL in use; entries older than this can never be served
    pub fn max_ttl(&self) -> Duration {
        [
            self.quotes_ttl,
            self.history_ttl,
            self.fx_ttl,
            self.ai_ttl,
            self.news_ttl,
            self.chat_ttl,
        ]
        .into_iter()
        .max()
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdvisorConfig::default();
        assert_eq!(config.quotes_ttl, Duration::from_secs(30));
        assert_eq!(config.news_ttl, Duration::from_secs(120));
        assert_eq!(config.max_body_bytes, 1_048_576);
        assert_eq!(config.limits.max_symbols, 25);
    }

    #[test]
    fn test_max_ttl() {
        let config = AdvisorConfig {
            chat_ttl: Duration::from_secs(900),
            ..AdvisorConfig::default()
        };
        assert_eq!(config.max_ttl(), Duration::from_secs(900));
        assert_eq!(AdvisorConfig::default().max_ttl(), Duration::from_secs(300));
    }
}
