//! User-facing text for a pipeline [`Outcome`].
//!
//! Both front ends render the same [`Report`]; the TUI styles each line by
//! its [`Tone`], the CLI prints it as plain text.

use crate::indicators::IndicatorValue;
use crate::pipeline::Outcome;
use crate::signal::Signal;
use serde::Serialize;
use std::fmt;

/// Symbol-format examples shown when a fetch fails.
pub const SYMBOL_HINTS: [(&str, &str); 3] = [
    ("Apple", "AAPL"),
    ("Tencent", "0700.HK"),
    ("Kweichow Moutai", "600519.SS"),
];

/// Severity of a message line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Info,
    Warning,
    Error,
}

/// Labelled headline number ("Current price", "200-day trend line").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub tone: Tone,
    pub text: String,
}

impl Message {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub symbol: String,
    pub metrics: Vec<Metric>,
    pub messages: Vec<Message>,
}

impl Report {
    /// Build the report for `outcome`. `symbol` is what the user asked for.
    pub fn from_outcome(symbol: &str, outcome: &Outcome) -> Self {
        let mut metrics = Vec::new();
        let mut messages = Vec::new();

        if let Some(snapshot) = outcome.snapshot() {
            metrics.push(Metric {
                label: "Current price".into(),
                value: format!("{:.2}", snapshot.current_price),
            });
            metrics.push(Metric {
                label: format!("{}-day trend line", snapshot.trend_window),
                value: snapshot.trend_filter.to_string(),
            });
        }

        match outcome {
            Outcome::Classified { signal, .. } => messages.extend(signal_messages(signal)),
            Outcome::Indeterminate {
                series,
                snapshot,
                missing,
            } => {
                let mut text = format!(
                    "Not enough history for {}: {} bars loaded.",
                    missing.join(" and "),
                    series.len()
                );
                for (name, value) in [
                    ("trend filter", snapshot.trend_filter),
                    ("breakout level", snapshot.breakout_level),
                ] {
                    if let IndicatorValue::NotAvailable { required, .. } = value {
                        text.push_str(&format!(" The {name} needs {required}."));
                    }
                }
                messages.push(Message::new(Tone::Warning, text));
                messages.push(Message::new(
                    Tone::Info,
                    "No recommendation is given until the history is long enough.",
                ));
            }
            Outcome::InsufficientData { .. } => {
                messages.push(Message::new(
                    Tone::Warning,
                    format!("No price history returned for {symbol}."),
                ));
            }
            Outcome::DataUnavailable { error, .. } => {
                messages.push(Message::new(Tone::Error, data_unavailable_text()));
                messages.push(Message::new(Tone::Info, format!("Cause: {error}")));
            }
        }

        Self {
            symbol: symbol.to_string(),
            metrics,
            messages,
        }
    }
}

fn signal_messages(signal: &Signal) -> Vec<Message> {
    match *signal {
        Signal::Breakout {
            breakout_level,
            stop_loss,
            ..
        } => vec![
            Message::new(
                Tone::Success,
                format!(
                    "BREAKOUT: price cleared the pivotal point {breakout_level:.2}. \
                     The line of least resistance points up; consider opening a first position."
                ),
            ),
            Message::new(
                Tone::Info,
                format!("Initial stop loss: {stop_loss:.2}"),
            ),
        ],
        Signal::Watch {
            breakout_level, ..
        } => vec![Message::new(
            Tone::Warning,
            format!(
                "WATCH: the long-term trend is up, but price has not cleared the pivotal point \
                 {breakout_level:.2}. Wait."
            ),
        )],
        Signal::Avoid { .. } => vec![Message::new(
            Tone::Error,
            "AVOID: price is at or below the trend line. Weak market, no entry.",
        )],
    }
}

fn data_unavailable_text() -> String {
    let hints: Vec<String> = SYMBOL_HINTS
        .iter()
        .map(|(name, code)| format!("{name} {code}"))
        .collect();
    format!(
        "Unable to load data. Check the symbol (e.g. {}).",
        hints.join(", ")
    )
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.symbol)?;
        for metric in &self.metrics {
            writeln!(f, "  {:<20} {}", metric.label, metric.value)?;
        }
        for message in &self.messages {
            writeln!(f, "{}", message.text)?;
        }
        Ok(())
    }
}
