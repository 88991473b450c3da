//! Test helpers: an in-memory provider and synthetic series.

use chrono::NaiveDate;
use pivotal_core::data::{DataProvider, ProviderError};
use pivotal_core::domain::{PriceBar, PriceSeries};
use ratatui::buffer::Buffer;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Serves fixed bars per symbol; unknown symbols are `SymbolNotFound`.
pub struct FakeProvider {
    series: HashMap<String, Vec<PriceBar>>,
    calls: Arc<AtomicUsize>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_series(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.series.insert(symbol.to_string(), bars);
        self
    }

    /// Shared fetch counter, readable after the provider is boxed.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl DataProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn fetch(&self, symbol: &str, _lookback: chrono::Duration) -> Result<PriceSeries, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let bars = self
            .series
            .get(symbol)
            .cloned()
            .ok_or_else(|| ProviderError::SymbolNotFound {
                symbol: symbol.to_string(),
            })?;
        Ok(PriceSeries::new(symbol, bars)?)
    }
}

/// Bars from closes with open = previous close and a one-point range.
pub fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: start + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: (open.min(close) - 1.0).max(0.0),
                close,
                volume: Some(1_000),
            }
        })
        .collect()
}

/// 249 rising closes from 50, then a gap up to 320: a breakout.
pub fn rising_then_gap() -> Vec<PriceBar> {
    let mut closes: Vec<f64> = (0..249).map(|i| 50.0 + i as f64).collect();
    closes.push(320.0);
    bars_from_closes(&closes)
}

/// Flatten a buffer into one string, row by row.
pub fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut content = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            content.push_str(buf.cell((x, y)).map_or(" ", |c| c.symbol()));
        }
        content.push('\n');
    }
    content
}
