//! Top row: symbol field and stop-loss slider.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode};
use crate::theme::Theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_symbol(f, chunks[0], app, theme);
    render_stop_loss(f, chunks[1], app, theme);
}

fn render_symbol(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let editing = app.mode == InputMode::EditingSymbol;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(editing))
        .title(" Symbol [/] ");

    let line = if editing {
        Line::from(vec![
            Span::styled(
                app.symbol_input.as_str(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("_", Style::default().fg(theme.accent)),
        ])
    } else {
        Line::from(Span::styled(
            app.symbol.as_str(),
            Style::default().fg(theme.text_primary),
        ))
    };
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_stop_loss(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(false))
        .title(" Stop loss % [h/l] ");

    let min = app.config.stop_loss_min;
    let max = app.config.stop_loss_max;
    let bar = render_slider_inline(app.stop_loss_pct, min, max, 20);
    let line = Line::from(vec![
        Span::styled(format!("{min:>2} "), theme.muted()),
        Span::styled(bar, Style::default().fg(theme.accent)),
        Span::styled(format!(" {max:<2}  "), theme.muted()),
        Span::styled(
            format!("{}%", app.stop_loss_pct),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_slider_inline(value: u32, min: u32, max: u32, width: usize) -> String {
    if max <= min {
        return format!("[{}]", "=".repeat(width));
    }
    let frac = (f64::from(value.clamp(min, max) - min) / f64::from(max - min)).clamp(0.0, 1.0);
    let filled = (frac * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(empty))
}
