//! Domain Value Objects
//!
//! Validated request parameters. Construction normalizes the input, so two
//! requests that mean the same thing produce equal values (and equal cache
//! fingerprints).

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::error::{AdvisorError, AdvisorResult};

/// Ticker symbol, upper-cased, `[A-Z0-9.^=&-]{1,15}`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub const MAX_LEN: usize = 15;

    pub fn parse(raw: &str) -> AdvisorResult<Self> {
        let symbol = raw.trim().to_ascii_uppercase();
        if symbol.is_empty() || symbol.len() > Self::MAX_LEN {
            return Err(AdvisorError::invalid(format!(
                "symbol must be 1 to {} characters",
                Self::MAX_LEN
            )));
        }
        let valid = symbol
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b".^=&-".contains(&b));
        if !valid {
            return Err(AdvisorError::invalid(format!("invalid symbol: {symbol}")));
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deduplicated, sorted set of symbols from a comma-separated list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymbolList(Vec<Symbol>);

impl SymbolList {
    pub fn parse(raw: &str, max: usize) -> AdvisorResult<Self> {
        let symbols = raw
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Symbol::parse)
            .collect::<AdvisorResult<BTreeSet<_>>>()?;

        if symbols.is_empty() {
            return Err(AdvisorError::invalid("symbols must not be empty"));
        }
        if symbols.len() > max {
            return Err(AdvisorError::too_large(format!(
                "at most {max} symbols per request"
            )));
        }
        Ok(Self(symbols.into_iter().collect()))
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// ISO 4217 style currency code, three upper-case ASCII letters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn parse(raw: &str) -> AdvisorResult<Self> {
        let code = raw.trim().to_ascii_uppercase();
        if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self(code))
        } else {
            Err(AdvisorError::invalid(format!(
                "currency code must be three letters, got {:?}",
                raw.trim()
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Allowed chart periods
pub const PERIODS: &[&str] = &[
    "1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max",
];

/// Allowed chart intervals
pub const INTERVALS: &[&str] = &[
    "1m", "2m", "5m", "15m", "30m", "60m", "90m", "1h", "1d", "5d", "1wk", "1mo", "3mo",
];

/// Period and sampling interval of a price history request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryRange {
    pub period: &'static str,
    pub interval: &'static str,
}

impl HistoryRange {
    pub const DEFAULT_PERIOD: &'static str = "1mo";
    pub const DEFAULT_INTERVAL: &'static str = "1d";

    pub fn parse(period: Option<&str>, interval: Option<&str>) -> AdvisorResult<Self> {
        Ok(Self {
            period: pick("period", period, PERIODS, Self::DEFAULT_PERIOD)?,
            interval: pick("interval", interval, INTERVALS, Self::DEFAULT_INTERVAL)?,
        })
    }
}

impl Default for HistoryRange {
    fn default() -> Self {
        Self {
            period: Self::DEFAULT_PERIOD,
            interval: Self::DEFAULT_INTERVAL,
        }
    }
}

fn pick(
    field: &str,
    raw: Option<&str>,
    allowed: &[&'static str],
    default: &'static str,
) -> AdvisorResult<&'static str> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(default);
    };
    let lowered = raw.to_ascii_lowercase();
    allowed
        .iter()
        .copied()
        .find(|candidate| *candidate == lowered)
        .ok_or_else(|| {
            AdvisorError::invalid(format!(
                "{field} must be one of {}",
                allowed.join(", ")
            ))
        })
}
