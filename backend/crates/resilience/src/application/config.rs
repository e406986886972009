//! Resilience Configuration

use std::time::Duration;

use platform::config::{env_millis, env_or, env_secs};
use platform::rate_limit::RateLimitConfig;

/// Retry executor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts including the first (at least 1)
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles after each further failure
    pub base_delay: Duration,
    /// Deadline for a single attempt
    pub attempt_timeout: Option<Duration>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            attempt_timeout: Some(Duration::from_secs(20)),
        }
    }
}

impl RetryConfig {
    /// Read `RETRY_MAX_ATTEMPTS`, `RETRY_BASE_DELAY_MS` and
    /// `UPSTREAM_TIMEOUT_SECS` (0 disables the per-attempt timeout)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let timeout = env_secs(
            "UPSTREAM_TIMEOUT_SECS",
            defaults.attempt_timeout.unwrap_or_default(),
        );
        Self {
            max_attempts: env_or("RETRY_MAX_ATTEMPTS", defaults.max_attempts).max(1),
            base_delay: env_millis("RETRY_BASE_DELAY_MS", defaults.base_delay),
            attempt_timeout: (!timeout.is_zero()).then_some(timeout),
        }
    }
}

/// Resilience layer configuration
#[derive(Debug, Clone)]
pub struct ResilienceConfig {
    pub rate_limit: RateLimitConfig,
    pub retry: RetryConfig,
    /// Interval of the background sweep; zero disables it
    pub sweep_interval: Duration,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            rate_limit: RateLimitConfig::default(),
            retry: RetryConfig::default(),
            sweep_interval: Duration::from_secs(300),
        }
    }
}

impl ResilienceConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            rate_limit: RateLimitConfig::from_env(),
            retry: RetryConfig::from_env(),
            sweep_interval: env_secs("CACHE_SWEEP_INTERVAL_SECS", defaults.sweep_interval),
        }
    }
}
