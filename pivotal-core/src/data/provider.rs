//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over data sources (Yahoo Finance, CSV
//! import) so the pipeline can swap implementations and tests can use fakes.

use crate::domain::{PriceSeries, SeriesError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error types for data operations.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("invalid price data: {0}")]
    InvalidData(#[from] SeriesError),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Where a series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Yahoo,
    Csv,
}

/// Trait for data providers.
///
/// Implementations make a single fetch attempt per call. The cache layer sits
/// above this trait; providers don't know about the cache.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily bars for `symbol` covering the trailing `lookback` window.
    ///
    /// The symbol is passed through to the source unmodified.
    fn fetch(&self, symbol: &str, lookback: chrono::Duration)
        -> Result<PriceSeries, ProviderError>;
}

impl<P: DataProvider + ?Sized> DataProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(
        &self,
        symbol: &str,
        lookback: chrono::Duration,
    ) -> Result<PriceSeries, ProviderError> {
        (**self).fetch(symbol, lookback)
    }
}
