use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Time-series payload returned by `GET /{start}..{end}`.
///
/// `rates` maps each reported date to a map of symbol → rate. A `BTreeMap`
/// keyed by date keeps the series chronologically ordered after deserialize.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub amount: f64,
    pub base: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rates: BTreeMap<NaiveDate, HashMap<String, f64>>,
}
