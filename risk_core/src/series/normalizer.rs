use std::collections::BTreeMap;

use crate::common::time::Day;
use crate::series::price_point::{PricePoint, RawTick};
use crate::series::price_series::PriceSeries;

/// Build a clean `PriceSeries` from raw feed records. Entries with
/// unparseable dates or missing/non-numeric/non-positive/non-finite values
/// are dropped silently; duplicate dates collapse last-write-wins. Empty
/// input yields an empty series, never an error.
pub fn normalize(raw: impl IntoIterator<Item = RawTick>) -> PriceSeries {
    normalize_pairs(
        raw.into_iter()
            .filter_map(|t| Some((t.date.to_day()?, t.close.to_f64()?))),
    )
}

/// Same cleanup for already-parsed pairs. Idempotent: feeding a normalized
/// series back through is the identity.
pub fn normalize_pairs(pairs: impl IntoIterator<Item = (Day, f64)>) -> PriceSeries {
    let mut by_day: BTreeMap<Day, f64> = BTreeMap::new();
    for (day, value) in pairs {
        if value.is_finite() && value > 0.0 {
            by_day.insert(day, value);
        }
    }
    PriceSeries::from_sorted(
        by_day
            .into_iter()
            .map(|(time, value)| PricePoint { time, value })
            .collect(),
    )
}
