//! Candle chart - OHLC candles with a trend line and price overlays
//!
//! Renders using direct buffer writes:
//! - Each candle = 1 terminal column, newest bar at the right edge
//! - Body: block char, green if close >= open, pink otherwise
//! - Wicks: vertical line chars to high/low
//! - Trend filter: dotted line, skipped during warmup
//! - Overlays: horizontal dashed lines at the pivotal point and stop loss

use pivotal_core::domain::PriceBar;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::app::{OverlayKind, PriceOverlay};
use crate::theme::Theme;

/// Width reserved for Y-axis labels.
const LABEL_WIDTH: u16 = 9;

pub struct CandleChart<'a> {
    bars: &'a [PriceBar],
    trend: &'a [f64],
    overlays: &'a [PriceOverlay],
    symbol: &'a str,
    trend_window: usize,
    theme: &'a Theme,
}

impl<'a> CandleChart<'a> {
    pub fn new(bars: &'a [PriceBar], symbol: &'a str, theme: &'a Theme) -> Self {
        Self {
            bars,
            trend: &[],
            overlays: &[],
            symbol,
            trend_window: 0,
            theme,
        }
    }

    /// Trend values aligned with `bars`; NaN entries are not drawn.
    pub fn trend(mut self, trend: &'a [f64], window: usize) -> Self {
        self.trend = trend;
        self.trend_window = window;
        self
    }

    pub fn overlays(mut self, overlays: &'a [PriceOverlay]) -> Self {
        self.overlays = overlays;
        self
    }

    fn overlay_color(&self, kind: OverlayKind) -> ratatui::style::Color {
        match kind {
            OverlayKind::Breakout => self.theme.accent,
            OverlayKind::StopLoss => self.theme.negative,
        }
    }
}

/// Map a price to a Y offset in the plot area (0 = top).
fn price_to_y(price: f64, y_min: f64, y_max: f64, plot_height: u16) -> u16 {
    if (y_max - y_min).abs() < 1e-9 || plot_height == 0 {
        return 0;
    }
    let frac = (price - y_min) / (y_max - y_min);
    let y = plot_height.saturating_sub(1) as f64 * (1.0 - frac);
    y.round().max(0.0).min(plot_height.saturating_sub(1) as f64) as u16
}

impl Widget for CandleChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.bars.is_empty() {
            Block::default()
                .title(format!(" {} [No Data] ", self.symbol))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.muted))
                .style(Style::default().bg(self.theme.background))
                .render(area, buf);
            return;
        }

        let up_count = self.bars.iter().filter(|b| b.is_up()).count();
        let down_count = self.bars.len() - up_count;
        let mut title = format!(
            " {} | {} bars | {} up {} down ",
            self.symbol,
            self.bars.len(),
            up_count,
            down_count,
        );
        if self.trend_window > 0 {
            title.push_str(&format!("| \u{2022} SMA {} ", self.trend_window));
        }

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));
        let inner = block.inner(area);
        block.render(area, buf);

        let plot_left = inner.x + LABEL_WIDTH;
        let plot_top = inner.y;
        let plot_width = inner.width.saturating_sub(LABEL_WIDTH);
        let plot_height = inner.height.saturating_sub(1);
        if plot_width == 0 || plot_height == 0 {
            return;
        }

        // Newest bars win when the series is wider than the plot.
        let start = self.bars.len().saturating_sub(plot_width as usize);
        let visible = &self.bars[start..];
        let visible_trend = self.trend.get(start..).unwrap_or(&[]);

        // Price bounds over everything that will be drawn.
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        let drawn = visible
            .iter()
            .flat_map(|b| [b.low, b.high])
            .chain(visible_trend.iter().copied())
            .chain(self.overlays.iter().map(|o| o.price))
            .filter(|p| p.is_finite());
        for price in drawn {
            y_min = y_min.min(price);
            y_max = y_max.max(price);
        }
        let range = y_max - y_min;
        let pad = if range > 0.0 { range * 0.05 } else { 1.0 };
        let y_lower = y_min - pad;
        let y_upper = y_max + pad;

        // Y-axis labels
        let y_labels = [y_upper, (y_upper + y_lower) / 2.0, y_lower];
        let y_positions = [0u16, plot_height / 2, plot_height.saturating_sub(1)];
        for (value, y_pos) in y_labels.iter().zip(y_positions.iter()) {
            buf.set_string(
                inner.x,
                plot_top + y_pos,
                format!("{:>8.2}", value),
                Style::default().fg(self.theme.muted),
            );
        }

        // Candles
        for (i, bar) in visible.iter().enumerate() {
            let x = plot_left + i as u16;
            let is_up = bar.is_up();
            let style = Style::default().fg(if is_up {
                self.theme.positive
            } else {
                self.theme.negative
            });

            let high_y = price_to_y(bar.high, y_lower, y_upper, plot_height);
            let low_y = price_to_y(bar.low, y_lower, y_upper, plot_height);
            let body_top_y = price_to_y(bar.open.max(bar.close), y_lower, y_upper, plot_height);
            let body_bot_y = price_to_y(bar.open.min(bar.close), y_lower, y_upper, plot_height);

            for y in high_y..body_top_y {
                buf.set_string(x, plot_top + y, "|", style);
            }
            let body_char = if is_up { "\u{2588}" } else { "\u{2593}" };
            for y in body_top_y..=body_bot_y {
                buf.set_string(x, plot_top + y, body_char, style);
            }
            for y in (body_bot_y + 1)..=low_y {
                buf.set_string(x, plot_top + y, "|", style);
            }
        }

        // Trend line on top of the candles
        let trend_style = Style::default().fg(self.theme.warning);
        for (i, value) in visible_trend.iter().enumerate().take(visible.len()) {
            if !value.is_finite() {
                continue;
            }
            let y = price_to_y(*value, y_lower, y_upper, plot_height);
            buf.set_string(plot_left + i as u16, plot_top + y, "\u{2022}", trend_style);
        }

        // Price overlays as dashed lines with a label at the left edge
        for overlay in self.overlays {
            let py = plot_top + price_to_y(overlay.price, y_lower, y_upper, plot_height);
            let color = self.overlay_color(overlay.kind);
            let style = Style::default().fg(color).add_modifier(Modifier::DIM);
            for x in plot_left..plot_left + plot_width {
                if (x - plot_left) % 3 == 0 {
                    buf.set_string(x, py, "-", style);
                }
            }
            let label = format!("{} {:.2}", overlay.label(), overlay.price);
            buf.set_string(
                plot_left,
                py,
                label,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
        }

        // Date range along the bottom
        let info_y = plot_top + plot_height;
        if let (Some(first), Some(last)) = (visible.first(), visible.last()) {
            let info = format!("{} .. {}", first.date, last.date);
            buf.set_string(plot_left, info_y, info, Style::default().fg(self.theme.muted));
        }
    }
}
