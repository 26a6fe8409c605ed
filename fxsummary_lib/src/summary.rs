//! Summary calculator: day-by-day percentage changes and aggregate totals.
//!
//! Pure functions over an already-resolved series. The one soft degradation
//! is a `None` pct_change when there is no prior day or the prior rate is
//! zero; every other failure is a real error.

use crate::error::FxError;
use crate::types::{
    Breakdown, DailyRecord, RateSeries, Summary, SummaryRequest, Totals, BASE_CURRENCY,
    TARGET_CURRENCY,
};

/// Computes the summary payload for a resolved series.
///
/// Fails with `EmptySeries` on a zero-entry series; the provider normally
/// prevents that, but the calculator defends independently.
pub fn summarize(request: &SummaryRequest, series: &RateSeries) -> Result<Summary, FxError> {
    if series.is_empty() {
        return Err(FxError::EmptySeries);
    }

    let records = build_day_records(series);
    let totals = build_totals(&records);

    Ok(Summary {
        base: BASE_CURRENCY.to_string(),
        target: TARGET_CURRENCY.to_string(),
        start_date: request.start_date,
        end_date: request.end_date,
        breakdown: request.breakdown,
        days: match request.breakdown {
            Breakdown::Day => Some(records),
            Breakdown::None => None,
        },
        totals,
    })
}

/// Percentage change from `previous` to `current`, rounded to 4 decimal
/// places. `None` when `previous` is zero.
fn pct_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some(round_to((current - previous) / previous * 100.0, 4))
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn build_day_records(series: &RateSeries) -> Vec<DailyRecord> {
    let mut records = Vec::with_capacity(series.len());
    let mut prev_rate: Option<f64> = None;

    for point in series.iter() {
        let pct = prev_rate.and_then(|prev| pct_change(point.rate, prev));
        records.push(DailyRecord {
            date: point.date,
            rate: point.rate,
            pct_change: pct,
        });
        prev_rate = Some(point.rate);
    }

    records
}

/// Aggregates over the full period. Callers have already rejected the
/// empty series.
fn build_totals(records: &[DailyRecord]) -> Totals {
    let start_rate = records[0].rate;
    let end_rate = records[records.len() - 1].rate;
    let total_pct_change = pct_change(end_rate, start_rate);
    let mean_rate = round_to(
        records.iter().map(|r| r.rate).sum::<f64>() / records.len() as f64,
        6,
    );

    Totals {
        start_rate,
        end_rate,
        total_pct_change,
        mean_rate,
    }
}
