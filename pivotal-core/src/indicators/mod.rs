//! Trend indicators and the per-run indicator snapshot.
//!
//! Full-series indicators implement [`Indicator`] and feed the chart overlay.
//! [`compute_snapshot`] reduces a series to the three numbers the classifier
//! needs, reporting thin history as [`IndicatorValue::NotAvailable`].

pub mod donchian;
pub mod sma;
pub mod snapshot;

pub use donchian::Donchian;
pub use sma::Sma;
pub use snapshot::{compute_snapshot, IndicatorError, IndicatorSnapshot, IndicatorValue};

use crate::domain::PriceBar;

/// Trait for indicators.
///
/// Indicators take a full bar series and produce a numeric output series of
/// the same length. The first `lookback()` values are `f64::NAN` (warmup).
///
/// # Look-ahead contamination guard
/// No indicator value at bar t may depend on price data from bar t+1 or later.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_200", "donchian_upper_20_prior").
    fn name(&self) -> &str;

    /// Number of bars needed before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[PriceBar]) -> Vec<f64>;
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLC: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = max(min(open,close) - 1.0, 0).
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<PriceBar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: (open.min(close) - 1.0).max(0.0),
                close,
                volume: Some(1000),
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
