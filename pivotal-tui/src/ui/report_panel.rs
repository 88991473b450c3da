//! Headline metrics and the recommendation block.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::AppState;
use crate::theme::Theme;

pub fn render_metrics(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let metrics = app
        .report
        .as_ref()
        .map(|r| r.metrics.as_slice())
        .unwrap_or_default();

    if metrics.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border(false));
        f.render_widget(
            Paragraph::new(Span::styled("Press Enter to load", theme.muted())).block(block),
            area,
        );
        return;
    }

    let constraints = vec![Constraint::Ratio(1, metrics.len() as u32); metrics.len()];
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (metric, chunk) in metrics.iter().zip(chunks.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border(false))
            .title(format!(" {} ", metric.label));
        let value = Span::styled(
            metric.value.as_str(),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(Paragraph::new(value).block(block), *chunk);
    }
}

pub fn render_recommendation(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let signal_kind = app
        .outcome
        .as_ref()
        .and_then(|o| o.signal())
        .map(|s| s.kind());

    let title = match signal_kind {
        Some(kind) => Line::from(vec![
            Span::raw(" Recommendation: "),
            Span::styled(
                kind.to_string(),
                Style::default()
                    .fg(theme.signal_color(kind))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ]),
        None => Line::from(" Recommendation "),
    };

    let lines: Vec<Line> = app
        .report
        .as_ref()
        .map(|r| {
            r.messages
                .iter()
                .map(|m| {
                    Line::from(Span::styled(
                        m.text.as_str(),
                        Style::default().fg(theme.tone_color(m.tone)),
                    ))
                })
                .collect()
        })
        .unwrap_or_default();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(false))
        .title(title);
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
