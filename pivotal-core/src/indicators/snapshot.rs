//! Indicator snapshot: the trend filter, breakout level and latest close at
//! the end of a series.

use super::{Donchian, Sma};
use crate::domain::PriceSeries;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Failures that leave no snapshot at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("insufficient data: the series has no bars")]
    EmptySeries,

    #[error("invalid {name} window: must be at least 1")]
    InvalidWindow { name: &'static str },
}

/// A snapshot field that is either computed or known to be missing.
///
/// Thin history yields `NotAvailable` rather than a mean or max over a
/// shorter window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum IndicatorValue {
    Available { value: f64 },
    NotAvailable { required: usize, available: usize },
}

impl IndicatorValue {
    fn from_option(value: Option<f64>, required: usize, available: usize) -> Self {
        match value {
            Some(value) if value.is_finite() => IndicatorValue::Available { value },
            _ => IndicatorValue::NotAvailable {
                required,
                available,
            },
        }
    }

    pub fn value(&self) -> Option<f64> {
        match *self {
            IndicatorValue::Available { value } => Some(value),
            IndicatorValue::NotAvailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, IndicatorValue::Available { .. })
    }
}

impl fmt::Display for IndicatorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorValue::Available { value } => write!(f, "{value:.2}"),
            IndicatorValue::NotAvailable {
                required,
                available,
            } => write!(f, "n/a ({available}/{required} bars)"),
        }
    }
}

/// Derived values at the last bar of a series. Recomputed on every run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub current_price: f64,
    pub trend_filter: IndicatorValue,
    pub breakout_level: IndicatorValue,
    pub trend_window: usize,
    pub breakout_window: usize,
}

/// Compute the snapshot for the end of `series`.
///
/// - `current_price`: close of the last bar.
/// - `trend_filter`: mean close of the last `trend_window` bars (last bar included).
/// - `breakout_level`: max high of the `breakout_window` bars before the last bar.
pub fn compute_snapshot(
    series: &PriceSeries,
    trend_window: usize,
    breakout_window: usize,
) -> Result<IndicatorSnapshot, IndicatorError> {
    let sma = Sma::new(trend_window).ok_or(IndicatorError::InvalidWindow {
        name: "trend filter",
    })?;
    let donchian = Donchian::upper_prior(breakout_window).ok_or(IndicatorError::InvalidWindow {
        name: "breakout",
    })?;

    let bars = series.bars();
    let last = series.last().ok_or(IndicatorError::EmptySeries)?;
    let n = bars.len();

    Ok(IndicatorSnapshot {
        current_price: last.close,
        trend_filter: IndicatorValue::from_option(sma.last_value(bars), trend_window, n),
        breakout_level: IndicatorValue::from_option(
            donchian.last_value(bars),
            donchian.required_bars(),
            n,
        ),
        trend_window,
        breakout_window,
    })
}
