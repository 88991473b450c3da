//! Prior-bar Donchian upper band: the breakout reference level.
//!
//! Value at t = max(high[t-period..=t-1]). The window ends one bar before t
//! so that bar t's own high can never define the level it is tested against.
//!
//! Lookback: period (first valid value at index period).

use super::Indicator;
use crate::domain::PriceBar;

#[derive(Debug, Clone)]
pub struct Donchian {
    period: usize,
    name: String,
}

impl Donchian {
    /// Upper band over the `period` bars preceding each bar. `None` for a zero period.
    pub fn upper_prior(period: usize) -> Option<Self> {
        (period >= 1).then(|| Self {
            period,
            name: format!("donchian_upper_{period}_prior"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Bars required for a value at the last bar: the window plus the bar itself.
    pub fn required_bars(&self) -> usize {
        self.period + 1
    }

    /// Level at the last bar, or `None` with fewer than `period + 1` bars.
    pub fn last_value(&self, bars: &[PriceBar]) -> Option<f64> {
        let n = bars.len();
        if n < self.required_bars() {
            return None;
        }
        Some(max_high(&bars[n - 1 - self.period..n - 1]))
    }
}

fn max_high(window: &[PriceBar]) -> f64 {
    window
        .iter()
        .map(|b| b.high)
        .fold(f64::NEG_INFINITY, f64::max)
}

impl Indicator for Donchian {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        for (i, slot) in result.iter_mut().enumerate().skip(self.period) {
            *slot = max_high(&bars[i - self.period..i]);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};
    use chrono::NaiveDate;

    fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<PriceBar> {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        data.iter()
            .enumerate()
            .map(|(i, &(open, high, low, close))| PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume: None,
            })
            .collect()
    }

    fn sample() -> Vec<PriceBar> {
        make_ohlc_bars(&[
            (10.0, 12.0, 9.0, 11.0),
            (11.0, 15.0, 10.0, 14.0),
            (14.0, 14.0, 13.0, 13.5),
            (13.5, 16.0, 12.0, 15.0),
            (15.0, 15.5, 14.0, 14.5),
        ])
    }

    #[test]
    fn upper_prior_3() {
        let result = Donchian::upper_prior(3).unwrap().compute(&sample());

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        // [3] = max(12, 15, 14) = 15; bar 3's own high of 16 is excluded
        assert_approx(result[3], 15.0, DEFAULT_EPSILON);
        // [4] = max(15, 14, 16) = 16
        assert_approx(result[4], 16.0, DEFAULT_EPSILON);
    }

    #[test]
    fn last_value_excludes_last_bar() {
        let mut bars = sample();
        bars[4].high = 99.0;
        bars[4].close = 98.0;
        let dc = Donchian::upper_prior(3).unwrap();
        assert_approx(dc.last_value(&bars).unwrap(), 16.0, DEFAULT_EPSILON);
    }

    #[test]
    fn last_value_needs_window_plus_one() {
        let bars = sample();
        let dc = Donchian::upper_prior(5).unwrap();
        assert_eq!(dc.required_bars(), 6);
        assert_eq!(dc.last_value(&bars), None);
        assert!(Donchian::upper_prior(4).unwrap().last_value(&bars).is_some());
    }

    #[test]
    fn last_value_matches_series() {
        let bars = sample();
        let dc = Donchian::upper_prior(2).unwrap();
        assert_eq!(dc.last_value(&bars), dc.compute(&bars).last().copied());
    }

    #[test]
    fn donchian_lookback() {
        assert_eq!(Donchian::upper_prior(20).unwrap().lookback(), 20);
        assert!(Donchian::upper_prior(0).is_none());
    }
}
