//! Signal classifier: trend regime gate followed by a breakout test.
//!
//! Evaluated in a fixed order, first match wins:
//! 1. close <= trend filter → `Avoid` (weak regime, breakout level ignored)
//! 2. close >  breakout level → `Breakout`, with a percentage stop loss
//! 3. otherwise → `Watch`
//!
//! Both comparisons are biased toward the conservative branch: a close equal
//! to the trend filter is `Avoid`, a close equal to the breakout level is `Watch`.

use crate::indicators::{IndicatorSnapshot, IndicatorValue};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Classifier failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    /// A required snapshot field is missing; no state is guessed.
    #[error("indeterminate signal: {} not available", .missing.join(" and "))]
    Indeterminate { missing: Vec<&'static str> },

    /// Caller passed a parameter outside its contract.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Three-way recommendation with the values that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Signal {
    Breakout {
        current_price: f64,
        trend_filter: f64,
        breakout_level: f64,
        stop_loss: f64,
    },
    Watch {
        current_price: f64,
        trend_filter: f64,
        breakout_level: f64,
    },
    Avoid {
        current_price: f64,
        trend_filter: f64,
        breakout_level: f64,
    },
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::Breakout { .. } => SignalKind::Breakout,
            Signal::Watch { .. } => SignalKind::Watch,
            Signal::Avoid { .. } => SignalKind::Avoid,
        }
    }

    pub fn current_price(&self) -> f64 {
        match *self {
            Signal::Breakout { current_price, .. }
            | Signal::Watch { current_price, .. }
            | Signal::Avoid { current_price, .. } => current_price,
        }
    }

    pub fn trend_filter(&self) -> f64 {
        match *self {
            Signal::Breakout { trend_filter, .. }
            | Signal::Watch { trend_filter, .. }
            | Signal::Avoid { trend_filter, .. } => trend_filter,
        }
    }

    pub fn breakout_level(&self) -> f64 {
        match *self {
            Signal::Breakout { breakout_level, .. }
            | Signal::Watch { breakout_level, .. }
            | Signal::Avoid { breakout_level, .. } => breakout_level,
        }
    }

    /// Stop-loss price; only a breakout carries one.
    pub fn stop_loss(&self) -> Option<f64> {
        match *self {
            Signal::Breakout { stop_loss, .. } => Some(stop_loss),
            _ => None,
        }
    }
}

/// Discriminant of [`Signal`] without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Breakout,
    Watch,
    Avoid,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SignalKind::Breakout => "BREAKOUT",
            SignalKind::Watch => "WATCH",
            SignalKind::Avoid => "AVOID",
        };
        f.write_str(label)
    }
}

/// Reject stop-loss percentages outside the open interval (0, 100).
pub fn validate_stop_loss_pct(stop_loss_pct: f64) -> Result<(), SignalError> {
    if stop_loss_pct.is_finite() && stop_loss_pct > 0.0 && stop_loss_pct < 100.0 {
        Ok(())
    } else {
        Err(SignalError::InvalidParameter {
            name: "stop_loss_pct",
            value: stop_loss_pct,
            reason: "must be strictly between 0 and 100",
        })
    }
}

/// Stop-loss price `pct` percent below `price`.
pub fn stop_loss_price(price: f64, stop_loss_pct: f64) -> f64 {
    price * (1.0 - stop_loss_pct / 100.0)
}

/// Classify a snapshot.
pub fn classify(snapshot: &IndicatorSnapshot, stop_loss_pct: f64) -> Result<Signal, SignalError> {
    validate_stop_loss_pct(stop_loss_pct)?;

    let (trend_filter, breakout_level) = match (snapshot.trend_filter, snapshot.breakout_level) {
        (IndicatorValue::Available { value: t }, IndicatorValue::Available { value: b }) => (t, b),
        (trend, breakout) => {
            let mut missing = Vec::new();
            if !trend.is_available() {
                missing.push("trend filter");
            }
            if !breakout.is_available() {
                missing.push("breakout level");
            }
            return Err(SignalError::Indeterminate { missing });
        }
    };

    let current_price = snapshot.current_price;
    if !current_price.is_finite() {
        return Err(SignalError::Indeterminate {
            missing: vec!["current price"],
        });
    }

    let signal = if current_price <= trend_filter {
        Signal::Avoid {
            current_price,
            trend_filter,
            breakout_level,
        }
    } else if current_price > breakout_level {
        Signal::Breakout {
            current_price,
            trend_filter,
            breakout_level,
            stop_loss: stop_loss_price(current_price, stop_loss_pct),
        }
    } else {
        Signal::Watch {
            current_price,
            trend_filter,
            breakout_level,
        }
    };

    debug!(kind = %signal.kind(), current_price, trend_filter, breakout_level, "classified");
    Ok(signal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(price: f64, trend: f64, breakout: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            current_price: price,
            trend_filter: IndicatorValue::Available { value: trend },
            breakout_level: IndicatorValue::Available { value: breakout },
            trend_window: 200,
            breakout_window: 20,
        }
    }

    #[test]
    fn breakout_above_trend_and_level() {
        let signal = classify(&snapshot(160.0, 100.0, 150.0), 10.0).unwrap();
        assert_eq!(signal.kind(), SignalKind::Breakout);
        assert!((signal.stop_loss().unwrap() - 144.0).abs() < 1e-9);
        assert_eq!(signal.breakout_level(), 150.0);
    }

    #[test]
    fn watch_between_trend_and_level() {
        let signal = classify(&snapshot(120.0, 100.0, 150.0), 10.0).unwrap();
        assert_eq!(signal.kind(), SignalKind::Watch);
        assert_eq!(signal.stop_loss(), None);
    }

    #[test]
    fn avoid_below_trend_ignores_level() {
        let signal = classify(&snapshot(90.0, 100.0, 150.0), 10.0).unwrap();
        assert_eq!(signal.kind(), SignalKind::Avoid);

        // Even a close above the breakout level is Avoid under the trend filter.
        let signal = classify(&snapshot(90.0, 100.0, 80.0), 10.0).unwrap();
        assert_eq!(signal.kind(), SignalKind::Avoid);
    }

    #[test]
    fn price_equal_to_trend_is_avoid() {
        let signal = classify(&snapshot(100.0, 100.0, 90.0), 10.0).unwrap();
        assert_eq!(signal.kind(), SignalKind::Avoid);
    }

    #[test]
    fn price_equal_to_level_is_watch() {
        let signal = classify(&snapshot(150.0, 100.0, 150.0), 10.0).unwrap();
        assert_eq!(signal.kind(), SignalKind::Watch);
    }

    #[test]
    fn missing_trend_is_indeterminate() {
        let mut snap = snapshot(160.0, 100.0, 150.0);
        snap.trend_filter = IndicatorValue::NotAvailable {
            required: 200,
            available: 50,
        };
        let err = classify(&snap, 10.0).unwrap_err();
        assert_eq!(
            err,
            SignalError::Indeterminate {
                missing: vec!["trend filter"]
            }
        );
    }

    #[test]
    fn missing_both_lists_both() {
        let mut snap = snapshot(160.0, 100.0, 150.0);
        snap.trend_filter = IndicatorValue::NotAvailable {
            required: 200,
            available: 5,
        };
        snap.breakout_level = IndicatorValue::NotAvailable {
            required: 21,
            available: 5,
        };
        let err = classify(&snap, 10.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "indeterminate signal: trend filter and breakout level not available"
        );
    }

    #[test]
    fn stop_loss_pct_out_of_range_is_rejected() {
        let snap = snapshot(160.0, 100.0, 150.0);
        for pct in [0.0, 100.0, -5.0, 150.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    classify(&snap, pct),
                    Err(SignalError::InvalidParameter { name: "stop_loss_pct", .. })
                ),
                "pct {pct} should be rejected"
            );
        }
        assert!(classify(&snap, 0.5).is_ok());
        assert!(classify(&snap, 99.5).is_ok());
    }

    #[test]
    fn stop_loss_scales_with_pct() {
        assert!((stop_loss_price(200.0, 5.0) - 190.0).abs() < 1e-9);
        assert!((stop_loss_price(200.0, 15.0) - 170.0).abs() < 1e-9);
    }

    #[test]
    fn classify_is_deterministic() {
        let snap = snapshot(160.0, 100.0, 150.0);
        assert_eq!(classify(&snap, 7.0), classify(&snap, 7.0));
    }
}
