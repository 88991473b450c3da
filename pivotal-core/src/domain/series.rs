//! PriceSeries: an immutable, date-ordered run of daily bars for one symbol.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use super::PriceBar;

/// Reasons a bar sequence cannot form a `PriceSeries`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("bar {index} ({date}) has invalid OHLC values")]
    InsaneBar { index: usize, date: NaiveDate },

    #[error("bar {index} ({date}) is not after the previous bar ({previous})")]
    OutOfOrder {
        index: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },
}

/// Ascending, strictly increasing daily bars for a single symbol.
///
/// An empty series is a valid value; the indicator engine reports it as
/// insufficient data rather than the constructor refusing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        for (index, bar) in bars.iter().enumerate() {
            if !bar.is_sane() {
                return Err(SeriesError::InsaneBar {
                    index,
                    date: bar.date,
                });
            }
            if index > 0 && bars[index - 1].date >= bar.date {
                return Err(SeriesError::OutOfOrder {
                    index,
                    date: bar.date,
                    previous: bars[index - 1].date,
                });
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    /// Close prices in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: None,
        }
    }

    #[test]
    fn accepts_gaps_between_trading_days() {
        // Friday then Monday
        let series = PriceSeries::new("SPY", vec![bar(1, 10.0), bar(4, 11.0)]).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.last().unwrap().close, 11.0);
    }

    #[test]
    fn rejects_duplicate_dates() {
        let err = PriceSeries::new("SPY", vec![bar(1, 10.0), bar(1, 11.0)]).unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { index: 1, .. }));
    }

    #[test]
    fn rejects_descending_dates() {
        let err = PriceSeries::new("SPY", vec![bar(5, 10.0), bar(4, 11.0)]).unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { .. }));
    }

    #[test]
    fn rejects_insane_bar() {
        let mut bad = bar(2, 10.0);
        bad.low = 12.0;
        let err = PriceSeries::new("SPY", vec![bar(1, 10.0), bad]).unwrap_err();
        assert_eq!(
            err,
            SeriesError::InsaneBar {
                index: 1,
                date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
            }
        );
    }

    #[test]
    fn empty_series_is_valid() {
        let series = PriceSeries::new("NEW", Vec::new()).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.last_date(), None);
        assert_eq!(series, PriceSeries::empty("NEW"));
    }
}
