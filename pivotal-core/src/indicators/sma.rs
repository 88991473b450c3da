//! Simple Moving Average (SMA) of close: the long-term trend filter.
//!
//! Lookback: period - 1 (first valid value at index period-1).

use super::Indicator;
use crate::domain::PriceBar;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    /// Returns `None` for a zero period.
    pub fn new(period: usize) -> Option<Self> {
        (period >= 1).then(|| Self {
            period,
            name: format!("sma_{period}"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Mean of the last `period` closes, or `None` if there are fewer bars.
    ///
    /// Summed oldest to newest in a fresh pass, so the value does not depend
    /// on how much history precedes the window.
    pub fn last_value(&self, bars: &[PriceBar]) -> Option<f64> {
        if bars.len() < self.period {
            return None;
        }
        let window = &bars[bars.len() - self.period..];
        let sum: f64 = window.iter().map(|b| b.close).sum();
        Some(sum / self.period as f64)
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period {
            return result;
        }

        // Initial window sum, then roll forward
        let mut sum: f64 = bars[..self.period].iter().map(|b| b.close).sum();
        result[self.period - 1] = sum / self.period as f64;

        for i in self.period..n {
            sum += bars[i].close - bars[i - self.period].close;
            result[i] = sum / self.period as f64;
        }

        result
    }
}
