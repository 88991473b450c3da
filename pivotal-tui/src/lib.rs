//! Pivotal TUI - single-symbol trend dashboard
//!
//! - Symbol input and stop-loss selector
//! - Headline metrics (current price, trend line)
//! - Recommendation block with pivotal point and stop loss
//! - Candle chart with trend-line and price overlays

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
