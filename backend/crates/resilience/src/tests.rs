//! Unit tests for the resilience crate

#[cfg(test)]
mod support {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::{Duration, Instant};

    use platform::client::ClientKey;
    use platform::clock::{Clock, ManualClock};
    use platform::rate_limit::{RateLimitConfig, RateLimitDecision};

    use crate::application::config::RetryConfig;
    use crate::application::gate::RequestGate;
    use crate::application::retry::RetryPolicy;
    use crate::domain::repository::RateLimitRepository;
    use crate::error::{ResilienceError, ResilienceResult, UpstreamError, UpstreamResult};
    use crate::infra::memory::{MemoryResponseCache, SlidingWindowRateLimiter};

    pub type TestGate = RequestGate<SlidingWindowRateLimiter, MemoryResponseCache<String>, String>;

    pub fn client(ip: &str) -> ClientKey {
        ClientKey::new(ip)
    }

    pub fn fast_retry() -> RetryPolicy {
        RetryPolicy::new(RetryConfig {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            attempt_timeout: None,
        })
    }

    pub fn gate_with(max_requests: u32, clock: &ManualClock) -> TestGate {
        RequestGate::new(
            Arc::new(SlidingWindowRateLimiter::new(RateLimitConfig::new(
                max_requests,
                60,
            ))),
            Arc::new(MemoryResponseCache::new()),
            fast_retry(),
            Arc::new(clock.clone()) as Arc<dyn Clock>,
        )
    }

    /// Upstream stub counting invocations
    #[derive(Clone, Default)]
    pub struct CountingUpstream {
        calls: Arc<AtomicU32>,
    }

    impl CountingUpstream {
        pub fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }

        pub async fn succeed(&self, value: &str) -> UpstreamResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(value.to_string())
        }

        /// Fails with a status equal to the attempt number
        pub async fn fail(&self) -> UpstreamResult<String> {
            let attempt = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Err(UpstreamError::Status {
                status: attempt as u16,
                body: String::new(),
            })
        }

        /// Fails `failures` times, then succeeds
        pub async fn flaky(&self, failures: u32, value: &str) -> UpstreamResult<String> {
            let attempt = self.calls.fetch_add(1, Ordering::SeqCst);
            if attempt < failures {
                Err(UpstreamError::Transport("connection reset".into()))
            } else {
                Ok(value.to_string())
            }
        }
    }

    /// Limiter whose backing store is always down
    pub struct BrokenLimiter;

    impl RateLimitRepository for BrokenLimiter {
        fn allow(&self, _key: &ClientKey, _now: Instant) -> ResilienceResult<RateLimitDecision> {
            Err(ResilienceError::Store("store offline".into()))
        }
    }
}

#[cfg(test)]
mod rate_limiter_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use platform::clock::{Clock, ManualClock};
    use platform::rate_limit::RateLimitConfig;

    use super::support::client;
    use crate::domain::repository::RateLimitRepository;
    use crate::infra::memory::SlidingWindowRateLimiter;

    #[test]
    fn test_sixty_first_request_in_window_is_rejected() {
        let clock = ManualClock::default();
        let start = clock.now();
        let limiter = SlidingWindowRateLimiter::new(RateLimitConfig::default());
        let key = client("203.0.113.7");

        for i in 0..60u64 {
            clock.set(start + Duration::from_micros(i * 8_300));
            let decision = limiter.allow(&key, clock.now()).unwrap();
            assert!(decision.allowed, "request {} should be allowed", i + 1);
            assert_eq!(decision.remaining, 59 - i as u32);
        }

        clock.set(start + Duration::from_millis(600));
        let decision = limiter.allow(&key, clock.now()).unwrap();
        assert!(!decision.allowed);
        let retry_after = decision.retry_after.unwrap();
        assert_eq!(retry_after, Duration::from_millis(59_400));

        clock.set(start + Duration::from_secs(61));
        assert!(limiter.allow(&key, clock.now()).unwrap().allowed);
    }

    #[test]
    fn test_rejected_request_is_not_recorded() {
        let clock = ManualClock::default();
        let start = clock.now();
        let limiter = SlidingWindowRateLimiter::new(RateLimitConfig::new(2, 60));
        let key = client("198.51.100.1");

        assert!(limiter.allow(&key, start).unwrap().allowed);
        clock.set(start + Duration::from_secs(30));
        assert!(limiter.allow(&key, clock.now()).unwrap().allowed);
        for _ in 0..5 {
            assert!(!limiter.allow(&key, clock.now()).unwrap().allowed);
        }

        // Only the first timestamp has left the window
        clock.set(start + Duration::from_secs(60));
        assert!(limiter.allow(&key, clock.now()).unwrap().allowed);
        assert!(!limiter.allow(&key, clock.now()).unwrap().allowed);
    }

    #[test]
    fn test_timestamp_exactly_window_old_is_dropped() {
        let clock = ManualClock::default();
        let start = clock.now();
        let limiter = SlidingWindowRateLimiter::new(RateLimitConfig::new(1, 60));
        let key = client("198.51.100.2");

        assert!(limiter.allow(&key, start).unwrap().allowed);
        assert!(
            !limiter
                .allow(&key, start + Duration::from_millis(59_999))
                .unwrap()
                .allowed
        );
        assert!(
            limiter
                .allow(&key, start + Duration::from_secs(60))
                .unwrap()
                .allowed
        );
    }

    #[test]
    fn test_clients_are_independent() {
        let clock = ManualClock::default();
        let limiter = SlidingWindowRateLimiter::new(RateLimitConfig::new(1, 60));
        let a = client("192.0.2.1");
        let b = client("192.0.2.2");

        assert!(limiter.allow(&a, clock.now()).unwrap().allowed);
        assert!(!limiter.allow(&a, clock.now()).unwrap().allowed);
        assert!(limiter.allow(&b, clock.now()).unwrap().allowed);
        assert_eq!(limiter.tracked_clients(), 2);
    }

    #[test]
    fn test_disabled_limiter_admits_everything() {
        let clock = ManualClock::default();
        let limiter = SlidingWindowRateLimiter::new(RateLimitConfig::new(0, 60));
        let key = client("192.0.2.9");

        for _ in 0..500 {
            assert!(limiter.allow(&key, clock.now()).unwrap().allowed);
        }
        assert_eq!(limiter.tracked_clients(), 0);
    }

    #[test]
    fn test_concurrent_requests_never_exceed_limit() {
        let clock = ManualClock::default();
        let now = clock.now();
        let limiter = Arc::new(SlidingWindowRateLimiter::new(RateLimitConfig::default()));
        let key = client("192.0.2.50");

        let admitted: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let limiter = Arc::clone(&limiter);
                    let key = key.clone();
                    scope.spawn(move || {
                        (0..25)
                            .filter(|_| limiter.allow(&key, now).unwrap().allowed)
                            .count()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(admitted, 60);
    }

    #[test]
    fn test_purge_idle_drops_only_expired_buckets() {
        let clock = ManualClock::default();
        let start = clock.now();
        let limiter = SlidingWindowRateLimiter::new(RateLimitConfig::default());

        limiter.allow(&client("192.0.2.1"), start).unwrap();
        limiter
            .allow(&client("192.0.2.2"), start + Duration::from_secs(50))
            .unwrap();

        let removed = limiter.purge_idle(start + Duration::from_secs(70));
        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_clients(), 1);
    }
}

#[cfg(test)]
mod cache_tests {
    use std::time::Duration;

    use platform::clock::{Clock, ManualClock};
    use serde_json::json;

    use crate::domain::fingerprint::Fingerprint;
    use crate::domain::repository::ResponseCacheRepository;
    use crate::infra::memory::MemoryResponseCache;

    const TTL: Duration = Duration::from_secs(120);

    #[test]
    fn test_entry_served_until_ttl_then_evicted() {
        let clock = ManualClock::default();
        let start = clock.now();
        let cache = MemoryResponseCache::<String>::new();
        let key = Fingerprint::derive("market_news", &json!({"topic": "rates"})).unwrap();

        cache.set(key.clone(), "articles".to_string(), start);

        clock.set(start + Duration::from_secs(119));
        assert_eq!(cache.get(&key, TTL, clock.now()), Some("articles".to_string()));

        clock.set(start + Duration::from_secs(121));
        assert_eq!(cache.get(&key, TTL, clock.now()), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_entry_exactly_ttl_old_is_fresh() {
        let clock = ManualClock::default();
        let start = clock.now();
        let cache = MemoryResponseCache::<u32>::new();
        let key = Fingerprint::derive("quotes", &json!(["AAPL"])).unwrap();

        cache.set(key.clone(), 1u32, start);
        assert_eq!(cache.get(&key, TTL, start + TTL), Some(1));
    }

    #[test]
    fn test_set_overwrites_and_resets_age() {
        let clock = ManualClock::default();
        let start = clock.now();
        let cache = MemoryResponseCache::<u32>::new();
        let key = Fingerprint::derive("quotes", &json!(["MSFT"])).unwrap();

        cache.set(key.clone(), 1u32, start);
        cache.set(key.clone(), 2u32, start + Duration::from_secs(100));
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get(&key, TTL, start + Duration::from_secs(200)),
            Some(2)
        );
    }

    #[test]
    fn test_logically_equal_payloads_share_an_entry() {
        let clock = ManualClock::default();
        let cache = MemoryResponseCache::<String>::new();
        let written = Fingerprint::derive(
            "goal_advice",
            &json!({"goal": {"name": "House", "targetAmount": 50000.0}}),
        )
        .unwrap();
        let read = Fingerprint::derive(
            "goal_advice",
            &json!({"goal": {"targetAmount": 50000.0, "name": "House"}}),
        )
        .unwrap();

        cache.set(written, "advice".to_string(), clock.now());
        assert_eq!(
            cache.get(&read, TTL, clock.now()),
            Some("advice".to_string())
        );
    }

    #[test]
    fn test_purge_older_than() {
        let clock = ManualClock::default();
        let start = clock.now();
        let cache = MemoryResponseCache::<u8>::new();
        let old = Fingerprint::derive("history", &json!({"symbol": "A"})).unwrap();
        let recent = Fingerprint::derive("history", &json!({"symbol": "B"})).unwrap();

        cache.set(old, 1u8, start);
        cache.set(recent.clone(), 2u8, start + Duration::from_secs(250));

        let removed = cache.purge_older_than(Duration::from_secs(300), start + Duration::from_secs(301));
        assert_eq!(removed, 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get(&recent, Duration::from_secs(300), start + Duration::from_secs(301)),
            Some(2)
        );
    }
}

#[cfg(test)]
mod retry_tests {
    use std::time::Duration;

    use tokio::time::Instant;
    use tokio_test::{assert_err, assert_ok};

    use super::support::{CountingUpstream, fast_retry};
    use crate::application::config::RetryConfig;
    use crate::application::retry::RetryPolicy;
    use crate::error::UpstreamError;

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_waits_full_backoff_and_returns_last_error() {
        let upstream = CountingUpstream::default();
        let policy = fast_retry();

        let started = Instant::now();
        let err = assert_err!(policy.execute(|| upstream.fail()).await);
        let elapsed = started.elapsed();

        assert_eq!(upstream.calls(), 3);
        assert!(elapsed >= Duration::from_millis(1_500), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(3_500), "slept after the last attempt");
        match err {
            UpstreamError::Status { status, .. } => assert_eq!(status, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_success_returns_without_delay() {
        let upstream = CountingUpstream::default();
        let policy = fast_retry();

        let started = Instant::now();
        let value = assert_ok!(policy.execute(|| upstream.succeed("ok")).await);

        assert_eq!(value, "ok");
        assert_eq!(upstream.calls(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_on_second_attempt() {
        let upstream = CountingUpstream::default();
        let policy = fast_retry();

        let started = Instant::now();
        let value = assert_ok!(policy.execute(|| upstream.flaky(1, "late")).await);

        assert_eq!(value, "late");
        assert_eq!(upstream.calls(), 2);
        assert!(started.elapsed() >= Duration::from_millis(500));
        assert!(started.elapsed() < Duration::from_millis(1_500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_on_third_attempt_after_both_backoffs() {
        let upstream = CountingUpstream::default();
        let policy = fast_retry();

        let started = Instant::now();
        let value = assert_ok!(policy.execute(|| upstream.flaky(2, "third")).await);

        // 0.5s after the first failure, 1.0s after the second
        assert_eq!(value, "third");
        assert_eq!(upstream.calls(), 3);
        assert!(started.elapsed() >= Duration::from_millis(1_500));
        assert!(started.elapsed() < Duration::from_millis(3_500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_attempt_times_out() {
        let policy = RetryPolicy::new(RetryConfig {
            max_attempts: 1,
            base_delay: Duration::from_millis(500),
            attempt_timeout: Some(Duration::from_secs(20)),
        });

        let result = policy
            .execute(|| async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, UpstreamError>(())
            })
            .await;

        match assert_err!(result) {
            UpstreamError::Timeout(limit) => assert_eq!(limit, Duration::from_secs(20)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt_policy_does_not_sleep() {
        let upstream = CountingUpstream::default();
        let policy = RetryPolicy::new(RetryConfig {
            max_attempts: 1,
            base_delay: Duration::from_secs(5),
            attempt_timeout: None,
        });

        let started = Instant::now();
        assert_err!(policy.execute(|| upstream.fail()).await);
        assert_eq!(upstream.calls(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}

#[cfg(test)]
mod gate_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use platform::clock::{Clock, ManualClock};
    use serde_json::json;

    use super::support::{BrokenLimiter, CountingUpstream, client, fast_retry, gate_with};
    use crate::application::gate::{GateOutcome, GateRequest, RequestGate, ServedFrom};
    use crate::error::ResilienceError;
    use crate::infra::memory::MemoryResponseCache;

    const TTL: Duration = Duration::from_secs(300);

    #[tokio::test]
    async fn test_miss_then_hit() {
        let clock = ManualClock::default();
        let gate = gate_with(60, &clock);
        let upstream = CountingUpstream::default();
        let key = client("192.0.2.10");
        let payload = json!({"symbol": "AAPL", "period": "1mo"});

        let first = gate
            .run(GateRequest::new(&key, "history", &payload, TTL), || {
                upstream.succeed("series")
            })
            .await;
        assert!(matches!(first, GateOutcome::Fresh(ref v) if v == "series"));

        clock.advance(Duration::from_secs(299));
        let second = gate
            .run(GateRequest::new(&key, "history", &payload, TTL), || {
                upstream.succeed("other")
            })
            .await;
        assert!(matches!(second, GateOutcome::Hit(ref v) if v == "series"));
        assert_eq!(upstream.calls(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_goes_back_upstream() {
        let clock = ManualClock::default();
        let gate = gate_with(60, &clock);
        let upstream = CountingUpstream::default();
        let key = client("192.0.2.11");
        let payload = json!({"topic": "bonds"});

        gate.run(GateRequest::new(&key, "market_news", &payload, TTL), || {
            upstream.succeed("v1")
        })
        .await;
        clock.advance(TTL + Duration::from_secs(1));
        let outcome = gate
            .run(GateRequest::new(&key, "market_news", &payload, TTL), || {
                upstream.succeed("v2")
            })
            .await;

        assert!(matches!(outcome, GateOutcome::Fresh(ref v) if v == "v2"));
        assert_eq!(upstream.calls(), 2);
    }

    #[tokio::test]
    async fn test_rejected_request_does_no_work() {
        let clock = ManualClock::default();
        let gate = gate_with(1, &clock);
        let upstream = CountingUpstream::default();
        let key = client("192.0.2.12");

        gate.run(
            GateRequest::new(&key, "quotes", &json!(["AAPL"]), TTL),
            || upstream.succeed("q"),
        )
        .await;
        assert_eq!(upstream.calls(), 1);

        let outcome = gate
            .run(
                GateRequest::new(&key, "quotes", &json!(["MSFT"]), TTL),
                || upstream.succeed("q"),
            )
            .await;

        assert!(matches!(outcome, GateOutcome::Rejected(ref d) if !d.allowed));
        assert_eq!(upstream.calls(), 1);
        assert_eq!(gate.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_rejection_precedes_cache_hit() {
        let clock = ManualClock::default();
        let gate = gate_with(1, &clock);
        let upstream = CountingUpstream::default();
        let key = client("192.0.2.13");
        let payload = json!(["AAPL"]);

        gate.run(GateRequest::new(&key, "quotes", &payload, TTL), || {
            upstream.succeed("q")
        })
        .await;
        let outcome = gate
            .run(GateRequest::new(&key, "quotes", &payload, TTL), || {
                upstream.succeed("q")
            })
            .await;

        match outcome.into_result() {
            Err(ResilienceError::RateLimited { retry_after }) => assert!(retry_after.is_some()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_substituted_and_not_cached() {
        let clock = ManualClock::default();
        let gate = gate_with(60, &clock);
        let upstream = CountingUpstream::default();
        let key = client("192.0.2.14");
        let payload = json!({"topic": "gold"});

        for round in 1..=2u32 {
            let outcome = gate
                .run(
                    GateRequest::new(&key, "market_news", &payload, TTL)
                        .with_fallback(|| "no news".to_string()),
                    || upstream.fail(),
                )
                .await;
            let served = outcome.into_result().unwrap();
            assert_eq!(served.value, "no news");
            assert_eq!(served.source, ServedFrom::Fallback);
            assert_eq!(upstream.calls(), 3 * round);
        }
        assert!(gate.cache().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_without_fallback_fails() {
        let clock = ManualClock::default();
        let gate = gate_with(60, &clock);
        let upstream = CountingUpstream::default();
        let key = client("192.0.2.15");

        let outcome = gate
            .run(
                GateRequest::new(&key, "chat", &json!({"newMessage": "hi"}), TTL),
                || upstream.fail(),
            )
            .await;

        match outcome {
            GateOutcome::Failed(ResilienceError::Exhausted { attempts, source }) => {
                assert_eq!(attempts, 3);
                assert!(source.to_string().contains('3'));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(gate.cache().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_flaky_upstream_result_is_cached() {
        let clock = ManualClock::default();
        let gate = gate_with(60, &clock);
        let upstream = CountingUpstream::default();
        let key = client("192.0.2.16");
        let payload = json!({"base": "USD", "quote": "EUR"});

        let outcome = gate
            .run(GateRequest::new(&key, "fx_rate", &payload, TTL), || {
                upstream.flaky(2, "0.92")
            })
            .await;
        assert_eq!(outcome.label(), "fresh");
        assert_eq!(upstream.calls(), 3);
        assert_eq!(gate.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_limiter_failure_fails_open() {
        let clock = ManualClock::default();
        let gate: RequestGate<BrokenLimiter, MemoryResponseCache<String>, String> =
            RequestGate::new(
                Arc::new(BrokenLimiter),
                Arc::new(MemoryResponseCache::new()),
                fast_retry(),
                Arc::new(clock.clone()) as Arc<dyn Clock>,
            );
        let upstream = CountingUpstream::default();
        let key = client("192.0.2.17");

        let outcome = gate
            .run(
                GateRequest::new(&key, "goal_advice", &json!({"goal": "car"}), TTL),
                || upstream.succeed("advice"),
            )
            .await;

        assert!(matches!(outcome, GateOutcome::Fresh(_)));
        assert_eq!(upstream.calls(), 1);
        assert!(gate.admit(&key).allowed);
    }

    #[tokio::test]
    async fn test_operations_do_not_share_entries() {
        let clock = ManualClock::default();
        let gate = gate_with(60, &clock);
        let upstream = CountingUpstream::default();
        let key = client("192.0.2.18");
        let payload = json!({"x": 1});

        gate.run(GateRequest::new(&key, "goal_advice", &payload, TTL), || {
            upstream.succeed("a")
        })
        .await;
        let outcome = gate
            .run(GateRequest::new(&key, "expense_advice", &payload, TTL), || {
                upstream.succeed("b")
            })
            .await;

        assert!(matches!(outcome, GateOutcome::Fresh(ref v) if v == "b"));
        assert_eq!(upstream.calls(), 2);
    }
}

#[cfg(test)]
mod sweeper_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use platform::clock::{Clock, ManualClock};
    use platform::rate_limit::RateLimitConfig;
    use serde_json::json;

    use super::support::client;
    use crate::domain::fingerprint::Fingerprint;
    use crate::domain::repository::{RateLimitRepository, ResponseCacheRepository};
    use crate::infra::memory::{MemoryResponseCache, SlidingWindowRateLimiter};
    use crate::infra::sweeper::spawn_sweeper;

    #[test]
    fn test_zero_interval_disables_sweeper() {
        let handle = spawn_sweeper(
            Arc::new(SlidingWindowRateLimiter::new(RateLimitConfig::default())),
            Arc::new(MemoryResponseCache::<String>::new()),
            Arc::new(ManualClock::default()) as Arc<dyn Clock>,
            Duration::ZERO,
            Duration::from_secs(300),
        );
        assert!(handle.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_purges_idle_state() {
        let clock = ManualClock::default();
        let limiter = Arc::new(SlidingWindowRateLimiter::new(RateLimitConfig::default()));
        let cache = Arc::new(MemoryResponseCache::<String>::new());

        limiter.allow(&client("192.0.2.30"), clock.now()).unwrap();
        cache.set(
            Fingerprint::derive("quotes", &json!(["AAPL"])).unwrap(),
            "q".to_string(),
            clock.now(),
        );

        let handle = spawn_sweeper(
            Arc::clone(&limiter),
            Arc::clone(&cache),
            Arc::new(clock.clone()) as Arc<dyn Clock>,
            Duration::from_secs(10),
            Duration::from_secs(300),
        )
        .unwrap();

        clock.advance(Duration::from_secs(301));
        tokio::time::sleep(Duration::from_secs(11)).await;
        tokio::task::yield_now().await;

        assert_eq!(limiter.tracked_clients(), 0);
        assert!(cache.is_empty());
        handle.abort();
    }
}

#[cfg(test)]
mod config_tests {
    use std::time::Duration;

    use crate::application::config::{ResilienceConfig, RetryConfig};

    #[test]
    fn test_defaults() {
        let config = ResilienceConfig::default();
        assert_eq!(config.rate_limit.max_requests, 60);
        assert_eq!(config.rate_limit.window, Duration::from_secs(60));
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.base_delay, Duration::from_millis(500));
        assert_eq!(config.retry.attempt_timeout, Some(Duration::from_secs(20)));
        assert_eq!(config.sweep_interval, Duration::from_secs(300));
    }

    #[test]
    fn test_retry_default_matches_policy() {
        let policy = crate::application::retry::RetryPolicy::default();
        assert_eq!(policy.config(), &RetryConfig::default());
    }
}
