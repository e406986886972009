//! Yahoo Finance Chart Client
//!
//! Quotes, history and FX rates all come from
//! `GET {base}/v8/finance/chart/{symbol}`. FX pairs use the `{BASE}{QUOTE}=X`
//! symbol convention.

use std::time::Duration;

use chrono::DateTime;
use platform::config::{env_or, env_secs};
use reqwest::{Client, Url, header};
use resilience::error::{UpstreamError, UpstreamResult};
use serde::Deserialize;

use super::{ensure_success, request_error};
use crate::domain::upstream::{MarketData, PricePoint, Quote};
use crate::domain::value_objects::{CurrencyCode, HistoryRange, Symbol};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

impl YahooConfig {
    /// Read `MARKET_DATA_BASE_URL` and `UPSTREAM_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_or("MARKET_DATA_BASE_URL", defaults.base_url),
            timeout: env_secs("UPSTREAM_TIMEOUT_SECS", defaults.timeout),
        }
    }
}

// ============================================================================
// Response models
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    currency: Option<String>,
    regular_market_price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteIndicator>,
}

#[derive(Debug, Deserialize)]
struct QuoteIndicator {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

impl ChartEnvelope {
    fn into_result(self, symbol: &str) -> UpstreamResult<ChartResult> {
        if let Some(error) = self.chart.error {
            return Err(UpstreamError::Decode(format!(
                "chart error for {symbol}: {} {}",
                error.code, error.description
            )));
        }
        self.chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| UpstreamError::Decode(format!("no chart data for {symbol}")))
    }
}

impl ChartResult {
    fn closes(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        let closes = self
            .indicators
            .quote
            .first()
            .map(|q| q.close.as_slice())
            .unwrap_or_default();
        self.timestamp
            .iter()
            .zip(closes)
            .filter_map(|(time, close)| close.filter(|c| c.is_finite()).map(|c| (*time, c)))
    }

    fn into_quote(self, symbol: &str) -> UpstreamResult<Quote> {
        let price = self
            .meta
            .regular_market_price
            .filter(|p| p.is_finite())
            .or_else(|| self.closes().last().map(|(_, close)| close))
            .ok_or_else(|| UpstreamError::Decode(format!("no price for {symbol}")))?;
        Ok(Quote {
            price,
            currency: self.meta.currency.unwrap_or_else(|| "USD".to_string()),
        })
    }

    fn into_series(self) -> Vec<PricePoint> {
        self.closes()
            .filter_map(|(time, close)| {
                let date = DateTime::from_timestamp(time, 0)?.format("%Y-%m-%d").to_string();
                Some(PricePoint { time, date, close })
            })
            .collect()
    }
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct YahooChartClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl YahooChartClient {
    pub fn new(config: YahooConfig) -> Result<Self, YahooClientError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| YahooClientError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(YahooClientError::InvalidBaseUrl(config.base_url));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
        })
    }

    /// `{base}/v8/finance/chart/{symbol}` with the symbol percent-encoded
    fn chart_url(&self, symbol: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v8", "finance", "chart", symbol]);
        }
        url
    }

    async fn chart(&self, symbol: &str, range: &str, interval: &str) -> UpstreamResult<ChartResult> {
        let response = self
            .client
            .get(self.chart_url(symbol))
            .query(&[("range", range), ("interval", interval)])
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| request_error(e, self.timeout))?;

        let envelope: ChartEnvelope = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| request_error(e, self.timeout))?;

        envelope.into_result(symbol)
    }
}

impl MarketData for YahooChartClient {
    async fn quote(&self, symbol: &Symbol) -> UpstreamResult<Quote> {
        self.chart(symbol.as_str(), "1d", "1d")
            .await?
            .into_quote(symbol.as_str())
    }

    async fn history(&self, symbol: &Symbol, range: &HistoryRange) -> UpstreamResult<Vec<PricePoint>> {
        let result = self
            .chart(symbol.as_str(), range.period, range.interval)
            .await?;
        Ok(result.into_series())
    }

    async fn fx_rate(&self, base: &CurrencyCode, quote: &CurrencyCode) -> UpstreamResult<f64> {
        let pair = format!("{base}{quote}=X");
        let pair_quote = self.chart(&pair, "1d", "1d").await?.into_quote(&pair)?;
        Ok(pair_quote.price)
    }
}

/// Construction failure of [`YahooChartClient`]
#[derive(Debug, thiserror::Error)]
pub enum YahooClientError {
    #[error("invalid market data base url: {0}")]
    InvalidBaseUrl(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
