//! Parrot/neon theme tokens for the Pivotal dashboard
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (focus, active input)
//! - **Positive**: Neon green (up candles, breakout)
//! - **Negative**: Hot pink (down candles, avoid, stop loss)
//! - **Warning**: Neon orange (watch, trend line)
//! - **Muted**: Steel blue (axis labels, hints)

use pivotal_core::report::Tone;
use pivotal_core::SignalKind;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub muted: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
        }
    }

    /// Color for a report line.
    pub fn tone_color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Success => self.positive,
            Tone::Info => self.accent,
            Tone::Warning => self.warning,
            Tone::Error => self.negative,
        }
    }

    /// Color for a recommendation badge.
    pub fn signal_color(&self, kind: SignalKind) -> Color {
        match kind {
            SignalKind::Breakout => self.positive,
            SignalKind::Watch => self.warning,
            SignalKind::Avoid => self.negative,
        }
    }

    /// Border style; the focused block gets the accent color.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }
}
