//! Yahoo Finance data provider.
//!
//! Fetches daily OHLC bars from Yahoo's v8 chart API. One request per fetch:
//! failures are returned to the caller immediately and never retried.
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes.
//! The CSV provider is the fallback when Yahoo is unavailable.

use super::provider::{DataProvider, ProviderError};
use crate::domain::{PriceBar, PriceSeries};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    /// Exchange offset from UTC in seconds; bar timestamps are shifted by it
    /// so that non-US listings land on their local trading date.
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Option<Vec<Option<u64>>>,
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_base_url("https://query2.finance.yahoo.com")
    }

    /// Provider pointed at an alternative chart API host.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| ProviderError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Build the chart API URL for a symbol and date range (end inclusive).
    fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let end_ts = end.and_time(NaiveTime::MIN).and_utc().timestamp() + 86_399;
        format!(
            "{}/v8/finance/chart/{symbol}\
             ?period1={start_ts}&period2={end_ts}&interval=1d",
            self.base_url
        )
    }

    /// Parse the chart API response into bars.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<PriceBar>, ProviderError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    ProviderError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    ProviderError::ResponseFormatChanged(format!(
                        "{}: {}",
                        err.code, err.description
                    ))
                }
            } else {
                ProviderError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ResponseFormatChanged("result array is empty".into()))?;

        let offset = data.meta.and_then(|m| m.gmtoffset).unwrap_or(0);

        // A valid symbol with no trading history in range has no timestamps.
        let Some(timestamps) = data.timestamp else {
            return Ok(Vec::new());
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ResponseFormatChanged("no quote data".into()))?;

        let mut bars: Vec<PriceBar> = Vec::with_capacity(timestamps.len());
        let mut skipped = 0usize;

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts + offset, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    ProviderError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let field = |v: &Vec<Option<f64>>| v.get(i).copied().flatten();
            let (Some(open), Some(high), Some(low), Some(close)) = (
                field(&quote.open),
                field(&quote.high),
                field(&quote.low),
                field(&quote.close),
            ) else {
                // Holidays and halted sessions come back as null rows
                skipped += 1;
                continue;
            };
            let volume = quote
                .volume
                .as_ref()
                .and_then(|v| v.get(i).copied().flatten());

            let bar = PriceBar {
                date,
                open,
                high,
                low,
                close,
                volume,
            };
            if !bar.is_sane() {
                // Rounding can leave a close a cent outside high/low
                skipped += 1;
                continue;
            }

            // The live session can be reported twice on the same date; keep the latest.
            match bars.last_mut() {
                Some(prev) if prev.date == date => *prev = bar,
                _ => bars.push(bar),
            }
        }

        if skipped > 0 {
            debug!(symbol, skipped, "skipped incomplete or inconsistent rows in chart response");
        }

        Ok(bars)
    }

    fn fetch_range(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, ProviderError> {
        let url = self.chart_url(symbol, start, end);
        debug!(%url, "requesting chart");

        let resp = self.client.get(&url).send().map_err(|e| {
            warn!(symbol, error = %e, "chart request failed");
            ProviderError::NetworkUnreachable(e.to_string())
        })?;

        let status = resp.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(ProviderError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ProviderError::AuthenticationRequired(format!(
                "Yahoo Finance refused the request (HTTP {status})"
            )));
        }

        if !status.is_success() {
            return Err(ProviderError::Other(format!("HTTP {status} for {symbol}")));
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            ProviderError::ResponseFormatChanged(format!(
                "failed to parse response for {symbol}: {e}"
            ))
        })?;

        Self::parse_response(symbol, chart)
    }
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(
        &self,
        symbol: &str,
        lookback: chrono::Duration,
    ) -> Result<PriceSeries, ProviderError> {
        let end = chrono::Local::now().date_naive();
        let start = end - lookback;
        let bars = self.fetch_range(symbol, start, end)?;
        info!(symbol, bars = bars.len(), %start, %end, "fetched from yahoo");
        Ok(PriceSeries::new(symbol, bars)?)
    }
}
