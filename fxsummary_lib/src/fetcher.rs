//! Retrying fetcher around the Frankfurter client.
//!
//! The retry policy is a plain value: tests construct one with millisecond
//! delays, production uses the defaults or `FX_RETRY_*` env overrides.

use std::time::Duration;

use chrono::NaiveDate;
use rand::Rng;

use frankfurter_api::{types::TimeSeries, Client, Error};

use crate::types::{RatePoint, RateSeries, BASE_CURRENCY, TARGET_CURRENCY};

/// Exponential-backoff retry policy consumed by [`RateFetcher`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: usize,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(8000),
        }
    }
}

impl RetryPolicy {
    /// Reads overrides from `FX_RETRY_MAX`, `FX_RETRY_BASE_MS` and
    /// `FX_RETRY_MAX_MS`, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_attempts: env_usize("FX_RETRY_MAX", defaults.max_attempts),
            base_delay: Duration::from_millis(env_u64(
                "FX_RETRY_BASE_MS",
                defaults.base_delay.as_millis() as u64,
            )),
            max_delay: Duration::from_millis(env_u64(
                "FX_RETRY_MAX_MS",
                defaults.max_delay.as_millis() as u64,
            )),
        }
    }

    /// Delay before the attempt following `attempt` (1-based): base doubled
    /// per attempt, capped, with a 0.8-1.2x jitter.
    fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = attempt.saturating_sub(1).min(30) as u32;
        let exp = 1u64 << shift;
        let base_ms = (self.base_delay.as_millis() as u64)
            .saturating_mul(exp)
            .min(self.max_delay.as_millis() as u64);
        let jitter = rand::thread_rng().gen_range(0.8..1.2);
        Duration::from_millis((base_ms as f64 * jitter) as u64)
    }
}

/// Outcome of a fetch after retries are exhausted. The provider pattern-
/// matches on this instead of inspecting raw client errors.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// Network, timeout, or server-side failure: every attempt failed.
    #[error("upstream unreachable after retries: {0}")]
    Transient(#[source] Error),
    /// Upstream rejected the query as malformed. Never retried.
    #[error("upstream rejected the query (HTTP {status})")]
    Rejected { status: u16, body: String },
}

impl From<Error> for FetchError {
    fn from(err: Error) -> Self {
        match err {
            Error::HttpStatus { status, body } if status != 429 && status < 500 => {
                FetchError::Rejected { status, body }
            }
            other => FetchError::Transient(other),
        }
    }
}

/// Fetches EUR→USD rate series from the upstream API with bounded retries.
///
/// No caching or fallback happens here; that is the provider's job.
pub struct RateFetcher {
    client: Client,
    policy: RetryPolicy,
}

impl RateFetcher {
    /// Creates a fetcher with the env-configured retry policy.
    pub fn new(client: Client) -> Self {
        Self::with_policy(client, RetryPolicy::from_env())
    }

    pub fn with_policy(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Fetches daily rates for `[start, end]`, retrying transient failures
    /// with exponential backoff. The backoff sleeps only this future.
    pub async fn fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<RateSeries, FetchError> {
        let mut attempt = 1usize;
        loop {
            let err = match self
                .client
                .get_timeseries(start, end, BASE_CURRENCY, TARGET_CURRENCY)
                .await
            {
                Ok(ts) => return Ok(series_from(ts)),
                Err(err) => err,
            };

            if !err.is_transient() || attempt >= self.policy.max_attempts {
                return Err(FetchError::from(err));
            }

            let delay = self.policy.delay_for_attempt(attempt);
            tracing::warn!(
                "rates request failed (attempt {}/{}), retrying in {:.1}s: {}",
                attempt,
                self.policy.max_attempts,
                delay.as_secs_f64(),
                err
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/// Extracts the target symbol from the raw payload. Dates missing the
/// symbol are skipped rather than recorded as a fabricated zero rate.
fn series_from(ts: TimeSeries) -> RateSeries {
    let points: Vec<RatePoint> = ts
        .rates
        .into_iter()
        .filter_map(|(date, symbols)| {
            symbols
                .get(TARGET_CURRENCY)
                .map(|&rate| RatePoint { date, rate })
        })
        .collect();
    RateSeries::from_points(points)
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(default)
}
