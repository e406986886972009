//! Rate Limiting Infrastructure
//!
//! Configuration and decision types shared by rate limiter implementations.

use std::time::Duration;

use crate::config::env_or;

/// Rate limit configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window; 0 disables limiting
    pub max_requests: u32,
    /// Sliding window length
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 60,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Read `RATE_LIMIT_MAX_REQUESTS` and `RATE_LIMIT_WINDOW_SECS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self::new(
            env_or("RATE_LIMIT_MAX_REQUESTS", defaults.max_requests),
            env_or("RATE_LIMIT_WINDOW_SECS", defaults.window.as_secs()),
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.max_requests > 0
    }
}

/// Outcome of one admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Requests still available in the current window
    pub remaining: u32,
    /// How long until a slot frees up (set on rejection)
    pub retry_after: Option<Duration>,
}

impl RateLimitDecision {
    pub fn allow(remaining: u32) -> Self {
        Self {
            allowed: true,
            remaining,
            retry_after: None,
        }
    }

    pub fn reject(retry_after: Duration) -> Self {
        Self {
            allowed: false,
            remaining: 0,
            retry_after: Some(retry_after),
        }
    }

    /// Decision used when limiting is disabled or the limiter itself failed
    pub fn unlimited() -> Self {
        Self::allow(u32::MAX)
    }
}
