//! Environment Configuration Helpers
//!
//! Typed reads of environment variables with defaults. Values are expected
//! to be loaded (e.g. from `.env`) before any config struct is built.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Read `key` and parse it, falling back to `default` when the variable is
/// unset, empty, or unparsable. Unparsable values are logged.
pub fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    parse_or(key, env::var(key).ok().as_deref(), default)
}

/// Read `key` as a whole number of seconds
pub fn env_secs(key: &str, default: Duration) -> Duration {
    Duration::from_secs(env_or(key, default.as_secs()))
}

/// Read `key` as a whole number of milliseconds
pub fn env_millis(key: &str, default: Duration) -> Duration {
    Duration::from_millis(env_or(key, default.as_millis() as u64))
}

/// Read `key` as a non-empty string
pub fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a raw value the way [`env_or`] does
pub fn parse_or<T>(key: &str, raw: Option<&str>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => default,
        Some(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(
                    key = key,
                    value = value,
                    error = %e,
                    default = %default,
                    "Invalid configuration value, using default"
                );
                default
            }
        },
    }
}
