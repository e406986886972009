//! Retry Executor
//!
//! Runs an upstream call up to `max_attempts` times with exponential backoff.
//! Every failure is retried the same way; the last one is returned as-is.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use super::config::RetryConfig;
use crate::error::{UpstreamError, UpstreamResult};

/// Retry policy for upstream calls
///
/// Holds configuration only. The attempt counter, the last error and the
/// next delay live on the stack of one [`RetryPolicy::execute`] call, so a
/// single policy can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config: RetryConfig {
                max_attempts: config.max_attempts.max(1),
                ..config
            },
        }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }

    /// Delay after failed attempt `attempt` (0-based): `base_delay * 2^attempt`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.config.base_delay.saturating_mul(factor)
    }

    /// Invoke `call` until it succeeds or the attempts run out
    pub async fn execute<T, F, Fut>(&self, mut call: F) -> UpstreamResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = UpstreamResult<T>>,
    {
        let max_attempts = self.config.max_attempts;
        let mut attempt = 0u32;

        loop {
            match self.attempt_once(&mut call).await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(attempt = attempt + 1, "Upstream call succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) if attempt + 1 >= max_attempts => {
                    warn!(
                        attempt = attempt + 1,
                        max_attempts,
                        error = %err,
                        "Upstream call failed, attempts exhausted"
                    );
                    return Err(err);
                }
                Err(err) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Upstream call failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt_once<T, F, Fut>(&self, call: &mut F) -> UpstreamResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = UpstreamResult<T>>,
    {
        match self.config.attempt_timeout {
            Some(limit) => tokio::time::timeout(limit, call())
                .await
                .unwrap_or(Err(UpstreamError::Timeout(limit))),
            None => call().await,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_double() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(500));
        assert_eq!(policy.delay_for(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2000));
    }

    #[test]
    fn test_zero_attempts_is_clamped() {
        let policy = RetryPolicy::new(RetryConfig {
            max_attempts: 0,
            ..RetryConfig::default()
        });
        assert_eq!(policy.max_attempts(), 1);
    }

    #[test]
    fn test_large_attempt_saturates() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(64), Duration::from_millis(500).saturating_mul(u32::MAX));
    }
}
