//! Pivotal core: single-symbol trend dashboard logic.
//!
//! - Domain types (price bars, validated series)
//! - Data providers (Yahoo Finance, CSV directory) behind a TTL cache
//! - Indicator snapshot (SMA trend filter, prior-window Donchian breakout level)
//! - Three-way signal classifier with a percentage stop loss
//! - Pipeline tying the above together, plus report text for the front ends

pub mod config;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod pipeline;
pub mod report;
pub mod signal;

pub use config::{ConfigError, DashboardConfig};
pub use pipeline::{run, Outcome, PipelineError, SignalRequest};
pub use report::Report;
pub use signal::{classify, Signal, SignalError, SignalKind};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: types handed to the front ends are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::PriceBar>();
        require_sync::<domain::PriceBar>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();

        require_send::<data::SeriesCache>();
        require_sync::<data::SeriesCache>();
        require_send::<data::ProviderError>();
        require_sync::<data::ProviderError>();
        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
        require_send::<data::CsvProvider>();
        require_sync::<data::CsvProvider>();

        require_send::<indicators::IndicatorSnapshot>();
        require_sync::<indicators::IndicatorSnapshot>();
        require_send::<Signal>();
        require_sync::<Signal>();
        require_send::<Outcome>();
        require_sync::<Outcome>();
        require_send::<Report>();
        require_sync::<Report>();
        require_send::<DashboardConfig>();
        require_sync::<DashboardConfig>();
    }

    /// Architecture contract: the classifier sees only the snapshot, never the series.
    #[test]
    fn classifier_takes_snapshot_only() {
        fn _check(snapshot: &indicators::IndicatorSnapshot) -> Result<Signal, SignalError> {
            classify(snapshot, 10.0)
        }
    }
}
