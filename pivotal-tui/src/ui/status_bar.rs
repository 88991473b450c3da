//! Bottom status bar: key hints and the last status message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, InputMode, StatusLevel};
use crate::theme::Theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let hints = match app.mode {
        InputMode::Normal => " /:symbol  h/l:stop loss  Enter:refresh  r:reload  q:quit",
        InputMode::EditingSymbol => " type symbol  Enter:confirm  Esc:cancel",
    };

    let mut spans = vec![Span::styled(hints, theme.muted()), Span::raw(" | ")];

    if let Some((msg, level)) = &app.status_message {
        let color = match level {
            StatusLevel::Info => theme.accent,
            StatusLevel::Warning => theme.warning,
            StatusLevel::Error => theme.negative,
        };
        spans.push(Span::styled(msg.as_str(), Style::default().fg(color)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
