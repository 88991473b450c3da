//! CSV import provider: offline fallback reading one file per symbol.
//!
//! Layout: `{dir}/{SYMBOL}.csv` with header `date,open,high,low,close[,volume]`
//! and ISO dates. The lookback window is measured back from the last date in
//! the file, so frozen fixtures keep producing the same series.

use super::provider::{DataProvider, ProviderError};
use crate::domain::{PriceBar, PriceSeries};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: Option<u64>,
}

impl From<CsvRow> for PriceBar {
    fn from(row: CsvRow) -> Self {
        PriceBar {
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        }
    }
}

/// Reads daily bars from CSV files in a directory.
pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, symbol: &str) -> Option<PathBuf> {
        if symbol.is_empty() || symbol.contains(['/', '\\']) || symbol.starts_with('.') {
            return None;
        }
        Some(self.dir.join(format!("{symbol}.csv")))
    }

    fn read_bars(path: &Path) -> Result<Vec<PriceBar>, ProviderError> {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| ProviderError::Io(format!("{}: {e}", path.display())))?;

        let mut bars = Vec::new();
        for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = row.map_err(|e| {
                ProviderError::ResponseFormatChanged(format!(
                    "{} row {}: {e}",
                    path.display(),
                    line + 1
                ))
            })?;
            bars.push(row.into());
        }
        Ok(bars)
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch(
        &self,
        symbol: &str,
        lookback: chrono::Duration,
    ) -> Result<PriceSeries, ProviderError> {
        let path = self
            .path_for(symbol)
            .filter(|p| p.is_file())
            .ok_or_else(|| ProviderError::SymbolNotFound {
                symbol: symbol.to_string(),
            })?;

        let mut bars = Self::read_bars(&path)?;
        if let Some(last) = bars.last().map(|b| b.date) {
            let start = last - lookback;
            bars.retain(|b| b.date >= start);
        }

        info!(symbol, bars = bars.len(), path = %path.display(), "loaded csv");
        Ok(PriceSeries::new(symbol, bars)?)
    }
}
