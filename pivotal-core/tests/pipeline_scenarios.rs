//! End-to-end dashboard scenarios through the CSV provider and the cache.

use pivotal_core::data::{CsvProvider, DataProvider, ProviderError, SeriesCache};
use pivotal_core::domain::PriceSeries;
use pivotal_core::indicators::{compute_snapshot, IndicatorSnapshot, IndicatorValue};
use pivotal_core::pipeline::{run, Outcome, SignalRequest};
use pivotal_core::report::{Report, Tone};
use pivotal_core::signal::{classify, SignalError, SignalKind};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_dir() -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("pivotal_scenarios_{}_{id}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// `flat` days at 100 (high 101, low 99), then one final bar.
fn write_csv(dir: &PathBuf, symbol: &str, flat: usize, last: (f64, f64, f64, f64)) {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut text = String::from("date,open,high,low,close,volume\n");
    for i in 0..flat {
        let date = start + chrono::Duration::days(i as i64);
        text.push_str(&format!("{date},100,101,99,100,1000\n"));
    }
    let date = start + chrono::Duration::days(flat as i64);
    let (open, high, low, close) = last;
    text.push_str(&format!("{date},{open},{high},{low},{close},2000\n"));
    std::fs::write(dir.join(format!("{symbol}.csv")), text).unwrap();
}

fn snapshot(price: f64, trend: f64, breakout: f64) -> IndicatorSnapshot {
    IndicatorSnapshot {
        current_price: price,
        trend_filter: IndicatorValue::Available { value: trend },
        breakout_level: IndicatorValue::Available { value: breakout },
        trend_window: 200,
        breakout_window: 20,
    }
}

// ── Reference scenarios on the classifier ────────────────────────────

#[test]
fn scenario_a_breakout() {
    let signal = classify(&snapshot(160.0, 100.0, 150.0), 10.0).unwrap();
    assert_eq!(signal.kind(), SignalKind::Breakout);
    assert!((signal.stop_loss().unwrap() - 144.0).abs() < 1e-9);
}

#[test]
fn scenario_b_watch() {
    let signal = classify(&snapshot(120.0, 100.0, 150.0), 10.0).unwrap();
    assert_eq!(signal.kind(), SignalKind::Watch);
    assert_eq!(signal.stop_loss(), None);
}

#[test]
fn scenario_c_avoid() {
    let signal = classify(&snapshot(90.0, 100.0, 150.0), 10.0).unwrap();
    assert_eq!(signal.kind(), SignalKind::Avoid);
}

#[test]
fn scenario_d_thin_history() {
    let dir = temp_dir();
    write_csv(&dir, "IPO", 49, (100.0, 101.0, 99.0, 100.0));
    let provider = CsvProvider::new(&dir);

    let series = provider.fetch("IPO", chrono::Duration::days(365)).unwrap();
    assert_eq!(series.len(), 50);
    let snap = compute_snapshot(&series, 200, 20).unwrap();
    assert_eq!(
        snap.trend_filter,
        IndicatorValue::NotAvailable {
            required: 200,
            available: 50
        }
    );
    assert!(matches!(
        classify(&snap, 10.0),
        Err(SignalError::Indeterminate { .. })
    ));

    let _ = std::fs::remove_dir_all(&dir);
}

// ── Full pipeline over CSV files ─────────────────────────────────────

#[test]
fn csv_pipeline_classifies_each_regime() {
    let dir = temp_dir();
    write_csv(&dir, "UP", 220, (100.0, 161.0, 99.0, 160.0));
    write_csv(&dir, "FLAT", 220, (100.0, 102.0, 99.0, 101.0));
    write_csv(&dir, "DOWN", 220, (100.0, 101.0, 89.0, 90.0));
    let provider = CsvProvider::new(&dir);
    let mut cache = SeriesCache::default();

    let up = run(&mut cache, &provider, &SignalRequest::new("UP", 10.0)).unwrap();
    let signal = up.signal().unwrap();
    assert_eq!(signal.kind(), SignalKind::Breakout);
    assert!((signal.breakout_level() - 101.0).abs() < 1e-9);
    assert!((signal.stop_loss().unwrap() - 144.0).abs() < 1e-9);

    // Close equal to the breakout level stays a watch.
    let flat = run(&mut cache, &provider, &SignalRequest::new("FLAT", 10.0)).unwrap();
    assert_eq!(flat.signal().unwrap().kind(), SignalKind::Watch);

    let down = run(&mut cache, &provider, &SignalRequest::new("DOWN", 10.0)).unwrap();
    assert_eq!(down.signal().unwrap().kind(), SignalKind::Avoid);

    assert_eq!(cache.len(), 3);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_symbol_is_data_unavailable_with_hints() {
    let dir = temp_dir();
    let provider = CsvProvider::new(&dir);
    let mut cache = SeriesCache::default();

    let outcome = run(&mut cache, &provider, &SignalRequest::new("NOPE", 10.0)).unwrap();
    match &outcome {
        Outcome::DataUnavailable { symbol, error } => {
            assert_eq!(symbol, "NOPE");
            assert!(matches!(error, ProviderError::SymbolNotFound { .. }));
        }
        other => panic!("expected DataUnavailable, got {other:?}"),
    }
    assert!(cache.is_empty());

    let report = Report::from_outcome("NOPE", &outcome);
    assert_eq!(report.messages[0].tone, Tone::Error);
    assert!(report.messages[0].text.contains("0700.HK"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn stop_loss_change_reuses_cached_series() {
    let dir = temp_dir();
    write_csv(&dir, "UP", 220, (100.0, 161.0, 99.0, 160.0));
    let provider = CsvProvider::new(&dir);
    let mut cache = SeriesCache::default();

    run(&mut cache, &provider, &SignalRequest::new("UP", 10.0)).unwrap();
    // The file is gone; only the cache can answer now.
    std::fs::remove_file(dir.join("UP.csv")).unwrap();
    let outcome = run(&mut cache, &provider, &SignalRequest::new("UP", 5.0)).unwrap();

    let stop = outcome.signal().unwrap().stop_loss().unwrap();
    assert!((stop - 152.0).abs() < 1e-9);
    let _ = std::fs::remove_dir_all(&dir);
}

// ── Provider failure ─────────────────────────────────────────────────

struct Unreachable {
    calls: AtomicUsize,
}

impl DataProvider for Unreachable {
    fn name(&self) -> &str {
        "unreachable"
    }

    fn fetch(&self, _symbol: &str, _lookback: chrono::Duration) -> Result<PriceSeries, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::NetworkUnreachable("connection refused".into()))
    }
}

#[test]
fn network_failure_is_not_cached() {
    let provider = Unreachable {
        calls: AtomicUsize::new(0),
    };
    let mut cache = SeriesCache::default();
    let request = SignalRequest::new("NVDA", 10.0);

    for _ in 0..2 {
        let outcome = run(&mut cache, &provider, &request).unwrap();
        assert!(outcome.is_data_unavailable());
        assert!(outcome.snapshot().is_none());
    }
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
}
