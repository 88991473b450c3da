//! In-memory read-through cache of fetched series.
//!
//! Keyed by symbol with a fixed time-to-live. Lives for the process lifetime:
//! created at startup, gone on restart. Failed fetches are never stored, so
//! the next request for the same symbol goes back to the provider. Expired
//! entries are dropped whenever a new series is stored.

use super::provider::{DataProvider, ProviderError};
use crate::domain::PriceSeries;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default time-to-live: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    series: Arc<PriceSeries>,
    fetched_at: Instant,
}

/// How a lookup was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLookup {
    Hit,
    Miss,
    Expired,
}

/// Read-through series cache.
#[derive(Debug)]
pub struct SeriesCache {
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
}

impl Default for SeriesCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl SeriesCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached series.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop the cached series for one symbol, forcing the next lookup to fetch.
    pub fn invalidate(&mut self, symbol: &str) -> bool {
        self.entries.remove(symbol).is_some()
    }

    /// Classify what a lookup at `now` would do, without fetching.
    pub fn probe_at(&self, symbol: &str, now: Instant) -> CacheLookup {
        match self.entries.get(symbol) {
            None => CacheLookup::Miss,
            Some(entry) if now.saturating_duration_since(entry.fetched_at) < self.ttl => {
                CacheLookup::Hit
            }
            Some(_) => CacheLookup::Expired,
        }
    }

    /// Return the cached series for `symbol`, fetching it on miss or expiry.
    pub fn get_or_fetch(
        &mut self,
        provider: &dyn DataProvider,
        symbol: &str,
        lookback: chrono::Duration,
    ) -> Result<Arc<PriceSeries>, ProviderError> {
        self.get_or_fetch_at(Instant::now(), provider, symbol, lookback)
    }

    /// Same as [`get_or_fetch`](Self::get_or_fetch) with an explicit clock reading.
    pub fn get_or_fetch_at(
        &mut self,
        now: Instant,
        provider: &dyn DataProvider,
        symbol: &str,
        lookback: chrono::Duration,
    ) -> Result<Arc<PriceSeries>, ProviderError> {
        let lookup = self.probe_at(symbol, now);
        if lookup == CacheLookup::Hit {
            if let Some(entry) = self.entries.get(symbol) {
                debug!(symbol, "cache hit");
                return Ok(Arc::clone(&entry.series));
            }
        }

        debug!(symbol, ?lookup, provider = provider.name(), "cache fetch");
        let series = match provider.fetch(symbol, lookback) {
            Ok(series) => Arc::new(series),
            Err(e) => {
                // Keep nothing for a failed symbol; a stale entry is not served either.
                self.entries.remove(symbol);
                return Err(e);
            }
        };

        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.fetched_at) < ttl);
        if self.entries.len() < before {
            debug!(evicted = before - self.entries.len(), "dropped expired series");
        }

        self.entries.insert(
            symbol.to_string(),
            CacheEntry {
                series: Arc::clone(&series),
                fetched_at: now,
            },
        );
        Ok(series)
    }
}
