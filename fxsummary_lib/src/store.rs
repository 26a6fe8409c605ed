//! Static fallback dataset, used when the live source stays unreachable.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::FxError;
use crate::types::{RatePoint, RateSeries};

/// Bundled EUR→USD sample rates (January 2025 business days).
const SAMPLE_FX: &str = include_str!("../data/sample_fx.json");

/// Read-only fallback dataset, parsed once at construction.
///
/// The on-disk format is a flat JSON object mapping ISO date strings to
/// rates for the fixed currency pair.
pub struct FallbackStore {
    points: Vec<RatePoint>,
}

impl FallbackStore {
    /// Loads the dataset bundled into the binary. The bundled file is
    /// covered by tests, so a parse failure here is a build defect.
    pub fn bundled() -> Self {
        Self::from_json_str(SAMPLE_FX).expect("bundled sample_fx.json is valid")
    }

    /// Parses a flat `{ "YYYY-MM-DD": rate }` JSON object.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let raw: BTreeMap<NaiveDate, f64> = serde_json::from_str(json)?;
        let points = raw
            .into_iter()
            .map(|(date, rate)| RatePoint { date, rate })
            .collect();
        Ok(Self { points })
    }

    /// Returns the subset of records within `[start, end]`.
    ///
    /// Zero overlap is a legitimate outcome and fails with `NoData` so the
    /// caller can decide how to degrade.
    pub fn slice(&self, start: NaiveDate, end: NaiveDate) -> Result<RateSeries, FxError> {
        let points: Vec<RatePoint> = self
            .points
            .iter()
            .copied()
            .filter(|p| p.date >= start && p.date <= end)
            .collect();
        if points.is_empty() {
            return Err(FxError::NoData { start, end });
        }
        Ok(RateSeries::from_points(points))
    }

    /// Number of bundled records.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
