//! One dashboard run: fetch → compute snapshot → classify.
//!
//! Every expected condition comes back as an [`Outcome`]; only a caller
//! contract violation (a bad stop-loss percentage) is an `Err`.

use crate::data::{DataProvider, ProviderError, SeriesCache};
use crate::domain::PriceSeries;
use crate::indicators::{compute_snapshot, IndicatorError, IndicatorSnapshot};
use crate::signal::{classify, validate_stop_loss_pct, Signal, SignalError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Inputs for a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRequest {
    pub symbol: String,
    pub stop_loss_pct: f64,
    pub trend_window: usize,
    pub breakout_window: usize,
    pub lookback: chrono::Duration,
}

impl SignalRequest {
    /// Request with the dashboard defaults: SMA 200, 20-bar breakout, one-year lookback.
    pub fn new(symbol: impl Into<String>, stop_loss_pct: f64) -> Self {
        Self {
            symbol: symbol.into(),
            stop_loss_pct,
            trend_window: 200,
            breakout_window: 20,
            lookback: chrono::Duration::days(365),
        }
    }
}

/// Errors that indicate a bug in the calling layer, not a market condition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    InvalidParameter(SignalError),

    #[error(transparent)]
    InvalidWindow(IndicatorError),
}

/// Result of a run, ready for the presentation layer.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Fetch failed; nothing was computed.
    DataUnavailable {
        symbol: String,
        error: ProviderError,
    },
    /// Fetch succeeded but returned no bars.
    InsufficientData { series: Arc<PriceSeries> },
    /// Not enough history for at least one indicator.
    Indeterminate {
        series: Arc<PriceSeries>,
        snapshot: IndicatorSnapshot,
        missing: Vec<&'static str>,
    },
    Classified {
        series: Arc<PriceSeries>,
        snapshot: IndicatorSnapshot,
        signal: Signal,
    },
}

impl Outcome {
    pub fn series(&self) -> Option<&Arc<PriceSeries>> {
        match self {
            Outcome::DataUnavailable { .. } => None,
            Outcome::InsufficientData { series }
            | Outcome::Indeterminate { series, .. }
            | Outcome::Classified { series, .. } => Some(series),
        }
    }

    pub fn snapshot(&self) -> Option<&IndicatorSnapshot> {
        match self {
            Outcome::Indeterminate { snapshot, .. } | Outcome::Classified { snapshot, .. } => {
                Some(snapshot)
            }
            _ => None,
        }
    }

    pub fn signal(&self) -> Option<&Signal> {
        match self {
            Outcome::Classified { signal, .. } => Some(signal),
            _ => None,
        }
    }

    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, Outcome::DataUnavailable { .. })
    }
}

/// Run the pipeline for one request.
pub fn run(
    cache: &mut SeriesCache,
    provider: &dyn DataProvider,
    request: &SignalRequest,
) -> Result<Outcome, PipelineError> {
    validate_stop_loss_pct(request.stop_loss_pct).map_err(PipelineError::InvalidParameter)?;
    if request.trend_window == 0 || request.breakout_window == 0 {
        let name = if request.trend_window == 0 {
            "trend filter"
        } else {
            "breakout"
        };
        return Err(PipelineError::InvalidWindow(IndicatorError::InvalidWindow {
            name,
        }));
    }

    let symbol = request.symbol.as_str();
    let series = match cache.get_or_fetch(provider, symbol, request.lookback) {
        Ok(series) => series,
        Err(error) => {
            warn!(symbol, %error, "data unavailable");
            return Ok(Outcome::DataUnavailable {
                symbol: symbol.to_string(),
                error,
            });
        }
    };

    let snapshot = match compute_snapshot(&series, request.trend_window, request.breakout_window) {
        Ok(snapshot) => snapshot,
        Err(IndicatorError::EmptySeries) => {
            warn!(symbol, "provider returned no bars");
            return Ok(Outcome::InsufficientData { series });
        }
        Err(e @ IndicatorError::InvalidWindow { .. }) => {
            return Err(PipelineError::InvalidWindow(e));
        }
    };

    match classify(&snapshot, request.stop_loss_pct) {
        Ok(signal) => {
            info!(symbol, kind = %signal.kind(), price = signal.current_price(), "signal");
            Ok(Outcome::Classified {
                series,
                snapshot,
                signal,
            })
        }
        Err(SignalError::Indeterminate { missing }) => {
            info!(symbol, ?missing, bars = series.len(), "indeterminate");
            Ok(Outcome::Indeterminate {
                series,
                snapshot,
                missing,
            })
        }
        Err(e @ SignalError::InvalidParameter { .. }) => Err(PipelineError::InvalidParameter(e)),
    }
}
