//! Data model for rate series and summary payloads.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Base currency for every request. Multi-pair support is a non-goal.
pub const BASE_CURRENCY: &str = "EUR";
/// Target currency for every request.
pub const TARGET_CURRENCY: &str = "USD";

/// One reported day: date and its EUR→USD rate.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RatePoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// An ordered series of daily rates, strictly increasing by date.
///
/// Gaps (weekends, holidays) are permitted; no interpolation is performed.
/// The series is immutable once constructed: consumers only read it, and the
/// cache stores its own clones.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RateSeries(Vec<RatePoint>);

impl RateSeries {
    /// Builds a series from arbitrary points, sorting chronologically and
    /// dropping duplicate dates so the ordering invariant always holds.
    pub fn from_points(mut points: Vec<RatePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        Self(points)
    }

    pub fn points(&self) -> &[RatePoint] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RatePoint> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&RatePoint> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&RatePoint> {
        self.0.last()
    }
}

/// Supported breakdown granularities.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Breakdown {
    Day,
    None,
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Breakdown::Day => write!(f, "day"),
            Breakdown::None => write!(f, "none"),
        }
    }
}

impl FromStr for Breakdown {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Breakdown::Day),
            "none" => Ok(Breakdown::None),
            other => Err(format!("unknown breakdown '{}', expected day or none", other)),
        }
    }
}

/// A summary request: date range plus breakdown granularity.
///
/// Dates are already parsed; malformed text is rejected at the boundary
/// (serde or argument parsing) before a request exists. Range inversion is
/// checked by the provider.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SummaryRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub breakdown: Breakdown,
}

/// Single-day record in the summary payload. `pct_change` is `None` for the
/// first record and whenever the prior day's rate is zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub rate: f64,
    pub pct_change: Option<f64>,
}

/// Aggregate statistics over the requested period.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Totals {
    pub start_rate: f64,
    pub end_rate: f64,
    /// `None` when `start_rate` is zero (division guard).
    pub total_pct_change: Option<f64>,
    pub mean_rate: f64,
}

/// Full summary payload. `days` is `None` when the breakdown is `none`;
/// totals are always present.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Summary {
    pub base: String,
    pub target: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub breakdown: Breakdown,
    pub days: Option<Vec<DailyRecord>>,
    pub totals: Totals,
}
