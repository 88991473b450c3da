//! Top-level UI layout: controls, metrics, recommendation, chart, status bar.

pub mod candle_chart;
pub mod controls;
pub mod report_panel;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::AppState;
use crate::theme::Theme;
use candle_chart::CandleChart;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let theme = Theme::default();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(f.area());

    controls::render(f, chunks[0], app, &theme);
    report_panel::render_metrics(f, chunks[1], app, &theme);
    report_panel::render_recommendation(f, chunks[2], app, &theme);

    let chart = CandleChart::new(&app.chart.bars, &app.symbol, &theme)
        .trend(&app.chart.trend, app.config.trend_window)
        .overlays(&app.chart.overlays);
    f.render_widget(chart, chunks[3]);

    status_bar::render(f, chunks[4], app, &theme);
}
