//! Keyboard input dispatch: symbol editor first, then dashboard keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, InputMode};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    match app.mode {
        InputMode::EditingSymbol => handle_symbol_key(app, key),
        InputMode::Normal => handle_dashboard_key(app, key),
    }
}

fn handle_symbol_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.confirm_symbol(),
        KeyCode::Esc => app.cancel_symbol_edit(),
        KeyCode::Backspace => {
            app.symbol_input.pop();
        }
        KeyCode::Char(c) if !c.is_whitespace() => {
            app.symbol_input.push(c);
        }
        _ => {}
    }
}

fn handle_dashboard_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('/') | KeyCode::Char('s') => app.begin_symbol_edit(),
        KeyCode::Enter => app.refresh(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('+') => app.increase_stop_loss(),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('-') => app.decrease_stop_loss(),
        _ => {}
    }
}
