//! PriceBar: one trading day of OHLC data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLC bar with optional volume.
///
/// Bars are stored as the provider reports them. Gaps for weekends and
/// holidays are expected; a series only requires strictly increasing dates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<u64>,
}

impl PriceBar {
    /// Returns true if any OHLC field is NaN or infinite.
    pub fn is_void(&self) -> bool {
        !(self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite())
    }

    /// OHLC sanity: finite, non-negative, and open/close inside [low, high].
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.low >= 0.0
            && self.low <= self.high
            && self.low <= self.open
            && self.open <= self.high
            && self.low <= self.close
            && self.close <= self.high
    }

    /// True when the bar closed at or above its open.
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}
