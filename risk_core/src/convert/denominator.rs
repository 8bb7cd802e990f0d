use std::cmp::Ordering;

use crate::series::price_point::PricePoint;
use crate::series::price_series::PriceSeries;

/// Re-express the numerator series in units of the denominator asset: an
/// inner join on date, dividing the two values at each common date. Dates
/// present in only one input are dropped, never interpolated. No overlap
/// (or an empty denominator) yields an empty series — conversion
/// unavailable, not an error.
pub fn convert(numerator: &PriceSeries, denominator: &PriceSeries) -> PriceSeries {
    let a = numerator.points();
    let b = denominator.points();
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let mut i = 0;
    let mut j = 0;
    while i < a.len() && j < b.len() {
        match a[i].time.cmp(&b[j].time) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(PricePoint {
                    time: a[i].time,
                    value: a[i].value / b[j].value,
                });
                i += 1;
                j += 1;
            }
        }
    }
    PriceSeries::from_sorted(out)
}
