//! Application state for the dashboard.
//!
//! Owns the series cache and the data provider for the process lifetime.
//! Every input change re-runs the pipeline synchronously; within the cache
//! TTL that is a cache hit and never touches the network.

use pivotal_core::data::{DataProvider, SeriesCache};
use pivotal_core::domain::PriceBar;
use pivotal_core::indicators::{Indicator, Sma};
use pivotal_core::pipeline::{self, Outcome};
use pivotal_core::{DashboardConfig, Report, Signal};
use tracing::{error, info};

/// Whether keystrokes go to the symbol field or to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditingSymbol,
}

/// Severity level for status bar messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Horizontal reference line drawn over the candles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Breakout,
    StopLoss,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceOverlay {
    pub price: f64,
    pub kind: OverlayKind,
}

impl PriceOverlay {
    pub fn label(&self) -> &'static str {
        match self.kind {
            OverlayKind::Breakout => "PVT",
            OverlayKind::StopLoss => "STP",
        }
    }
}

/// Everything the chart needs, derived once per pipeline run.
#[derive(Debug, Clone, Default)]
pub struct ChartData {
    pub bars: Vec<PriceBar>,
    /// Trend filter per bar; NaN during warmup.
    pub trend: Vec<f64>,
    pub overlays: Vec<PriceOverlay>,
}

impl ChartData {
    fn from_outcome(outcome: &Outcome, trend_window: usize) -> Self {
        let Some(series) = outcome.series() else {
            return Self::default();
        };
        let bars = series.bars().to_vec();
        let trend = Sma::new(trend_window)
            .map(|sma| sma.compute(&bars))
            .unwrap_or_default();

        let mut overlays = Vec::new();
        if let Some(level) = outcome.snapshot().and_then(|s| s.breakout_level.value()) {
            overlays.push(PriceOverlay {
                price: level,
                kind: OverlayKind::Breakout,
            });
        }
        if let Some(Signal::Breakout { stop_loss, .. }) = outcome.signal() {
            overlays.push(PriceOverlay {
                price: *stop_loss,
                kind: OverlayKind::StopLoss,
            });
        }

        Self {
            bars,
            trend,
            overlays,
        }
    }
}

pub struct AppState {
    pub running: bool,
    pub mode: InputMode,
    pub config: DashboardConfig,

    /// Symbol the dashboard currently shows.
    pub symbol: String,
    /// Edit buffer while `mode == EditingSymbol`.
    pub symbol_input: String,
    pub stop_loss_pct: u32,

    pub outcome: Option<Outcome>,
    pub report: Option<Report>,
    pub chart: ChartData,
    pub status_message: Option<(String, StatusLevel)>,

    cache: SeriesCache,
    provider: Box<dyn DataProvider>,
}

impl AppState {
    pub fn new(config: DashboardConfig, provider: Box<dyn DataProvider>) -> Self {
        let cache = SeriesCache::new(config.cache_ttl());
        Self {
            running: true,
            mode: InputMode::Normal,
            symbol: config.symbol.clone(),
            symbol_input: String::new(),
            stop_loss_pct: config.stop_loss_pct,
            outcome: None,
            report: None,
            chart: ChartData::default(),
            status_message: None,
            cache,
            provider,
            config,
        }
    }

    /// Run the pipeline for the current symbol and stop loss.
    pub fn refresh(&mut self) {
        let request = self.config.request(&self.symbol, self.stop_loss_pct);
        match pipeline::run(&mut self.cache, &*self.provider, &request) {
            Ok(outcome) => {
                self.report = Some(Report::from_outcome(&self.symbol, &outcome));
                self.chart = ChartData::from_outcome(&outcome, self.config.trend_window);
                match &outcome {
                    Outcome::DataUnavailable { error, .. } => {
                        self.set_error(format!("{}: {error}", self.symbol));
                    }
                    Outcome::Classified { signal, .. } => {
                        self.set_status(format!("{} {}", self.symbol, signal.kind()));
                    }
                    Outcome::Indeterminate { .. } | Outcome::InsufficientData { .. } => {
                        self.set_warning(format!("{}: not enough history", self.symbol));
                    }
                }
                self.outcome = Some(outcome);
            }
            Err(e) => {
                error!(error = %e, "pipeline rejected request");
                self.outcome = None;
                self.report = None;
                self.chart = ChartData::default();
                self.set_error(e.to_string());
            }
        }
    }

    /// Drop the cached series for the current symbol and fetch again.
    pub fn reload(&mut self) {
        self.cache.invalidate(&self.symbol);
        info!(symbol = %self.symbol, "reload requested");
        self.refresh();
    }

    pub fn cached_symbols(&self) -> usize {
        self.cache.len()
    }

    // ── Stop-loss selector ───────────────────────────────────────────

    pub fn increase_stop_loss(&mut self) {
        if self.stop_loss_pct < self.config.stop_loss_max {
            self.stop_loss_pct += 1;
            self.refresh();
        }
    }

    pub fn decrease_stop_loss(&mut self) {
        if self.stop_loss_pct > self.config.stop_loss_min {
            self.stop_loss_pct -= 1;
            self.refresh();
        }
    }

    // ── Symbol editing ───────────────────────────────────────────────

    pub fn begin_symbol_edit(&mut self) {
        self.symbol_input = self.symbol.clone();
        self.mode = InputMode::EditingSymbol;
    }

    pub fn cancel_symbol_edit(&mut self) {
        self.symbol_input.clear();
        self.mode = InputMode::Normal;
    }

    /// Commit the edit buffer. An empty buffer keeps the previous symbol.
    pub fn confirm_symbol(&mut self) {
        let symbol = self.symbol_input.trim().to_string();
        self.symbol_input.clear();
        self.mode = InputMode::Normal;
        if symbol.is_empty() {
            self.set_warning("Symbol cannot be empty");
            return;
        }
        self.symbol = symbol;
        self.refresh();
    }

    // ── Status bar ───────────────────────────────────────────────────

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}
