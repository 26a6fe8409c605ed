//! Core EUR→USD rate-summary pipeline.
//!
//! Wraps the `frankfurter_api` client with retry, an in-memory TTL+LRU cache,
//! and a bundled fallback dataset, then derives day-by-day and aggregate
//! percentage-change statistics from the resolved rate series.

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod provider;
pub mod store;
pub mod summary;
pub mod types;

pub use frankfurter_api;

pub use cache::RateCache;
pub use error::FxError;
pub use fetcher::{FetchError, RateFetcher, RetryPolicy};
pub use provider::RateProvider;
pub use store::FallbackStore;
pub use summary::summarize;
pub use types::{
    Breakdown, DailyRecord, RatePoint, RateSeries, Summary, SummaryRequest, Totals, BASE_CURRENCY,
    TARGET_CURRENCY,
};
