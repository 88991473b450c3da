//! Market data providers and the response cache

pub mod cache;
pub mod csv_import;
pub mod provider;
pub mod yahoo;

pub use cache::{CacheLookup, SeriesCache, DEFAULT_TTL};
pub use csv_import::CsvProvider;
pub use provider::{DataProvider, DataSource, ProviderError};
pub use yahoo::YahooProvider;
