//! Rate provider: cache → upstream fetch → fallback, in that order.

use chrono::NaiveDate;

use crate::cache::RateCache;
use crate::error::FxError;
use crate::fetcher::{FetchError, RateFetcher};
use crate::store::FallbackStore;
use crate::summary::summarize;
use crate::types::{RateSeries, Summary, SummaryRequest, BASE_CURRENCY, TARGET_CURRENCY};

/// Resolves a date range to a rate series and derives summaries from it.
///
/// All components are injected, so tests can wire a mock upstream, an
/// isolated cache, and any fallback dataset.
pub struct RateProvider {
    fetcher: RateFetcher,
    cache: RateCache,
    store: FallbackStore,
}

impl RateProvider {
    pub fn new(fetcher: RateFetcher, cache: RateCache, store: FallbackStore) -> Self {
        Self {
            fetcher,
            cache,
            store,
        }
    }

    /// Resolves the rate series for `[start, end]`.
    ///
    /// Order: validation, cache lookup, upstream fetch (cached on success),
    /// fallback slice. Fallback data is a degraded path and is never cached,
    /// so the next call re-attempts upstream.
    pub async fn get_rates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RateSeries, FxError> {
        if start > end {
            return Err(FxError::InvalidRange { start, end });
        }

        let key = cache_key(start, end);
        if let Some(series) = self.cache.get(&key) {
            tracing::debug!("Cache hit for {}", key);
            return Ok(series);
        }

        match self.fetcher.fetch(start, end).await {
            Ok(series) => {
                self.cache.put(key, series.clone());
                Ok(series)
            }
            Err(FetchError::Rejected { status, body }) => {
                Err(FxError::BadRequest { status, body })
            }
            Err(FetchError::Transient(err)) => {
                tracing::warn!(
                    "Upstream unreachable after retries ({}), using fallback dataset",
                    err
                );
                self.store
                    .slice(start, end)
                    .map_err(|_| FxError::Unavailable { start, end })
            }
        }
    }

    /// Resolves rates for the request and computes the summary payload.
    pub async fn get_summary(&self, request: &SummaryRequest) -> Result<Summary, FxError> {
        let series = self.get_rates(request.start_date, request.end_date).await?;
        summarize(request, &series)
    }

    /// Removes all cached rate series.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

fn cache_key(start: NaiveDate, end: NaiveDate) -> String {
    format!("{}:{}:{}..{}", BASE_CURRENCY, TARGET_CURRENCY, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_deterministic() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert_eq!(cache_key(start, end), "EUR:USD:2025-01-02..2025-01-10");
    }
}
