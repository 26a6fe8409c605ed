//! Error taxonomy for the rate-summary pipeline.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced to callers of the pipeline.
///
/// Transient upstream failures are retried inside the fetcher and only show
/// up here (as `Unavailable`) once both retries and the fallback dataset are
/// exhausted. Validation and malformed-query errors surface immediately.
#[derive(Error, Debug)]
pub enum FxError {
    /// The requested range is inverted. Rejected before any cache or network access.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    /// Upstream rejected the query as malformed. Not retried, no fallback.
    #[error("Upstream rejected the query (HTTP {status})")]
    BadRequest { status: u16, body: String },
    /// The bundled fallback dataset has no overlap with the requested range.
    #[error("No fallback data for {start}..{end}")]
    NoData { start: NaiveDate, end: NaiveDate },
    /// Neither upstream nor fallback can serve the requested range.
    #[error("Rates unavailable for {start}..{end}: upstream unreachable and no fallback data")]
    Unavailable { start: NaiveDate, end: NaiveDate },
    /// The resolved series had zero entries. Defensive: the provider
    /// normally guarantees a non-empty series or fails with `Unavailable`.
    #[error("Cannot summarize an empty rate series")]
    EmptySeries,
}
