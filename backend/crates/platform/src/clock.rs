//! Clock abstraction
//!
//! Time-dependent policies (sliding windows, TTLs) read the time through
//! [`Clock`] so tests can drive time explicitly.

use std::time::Instant;

/// Source of monotonic time
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Clock backed by `Instant::now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "test-helpers"))]
mod manual {
    use super::Clock;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    /// Manually driven clock for tests.
    ///
    /// Clones share the same time value.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        current: Arc<Mutex<Instant>>,
    }

    impl ManualClock {
        pub fn new(start: Instant) -> Self {
            Self {
                current: Arc::new(Mutex::new(start)),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut current = self.current.lock().unwrap();
            *current += by;
        }

        pub fn set(&self, to: Instant) {
            *self.current.lock().unwrap() = to;
        }
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::new(Instant::now())
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.current.lock().unwrap()
        }
    }
}
