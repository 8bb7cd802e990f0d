use crate::series::price_point::PricePoint;
use crate::series::price_series::PriceSeries;

/// Weekly resampling for prices: one point per week carrying the last
/// observation of that week, stamped with the week's starting Sunday.
/// Weeks run Sunday..Saturday (see `Day::week_start`).
pub fn weekly_last(series: &PriceSeries) -> Vec<PricePoint> {
    resample(series, |bucket| bucket.last().copied().unwrap_or(0.0))
}

/// Weekly resampling for counts/volumes: one point per week with the sum of
/// that week's values, stamped with the week's starting Sunday.
pub fn weekly_sum(series: &PriceSeries) -> Vec<PricePoint> {
    resample(series, |bucket| bucket.iter().sum())
}

fn resample(series: &PriceSeries, reduce: impl Fn(&[f64]) -> f64) -> Vec<PricePoint> {
    let mut out = Vec::new();
    let mut bucket: Vec<f64> = Vec::new();
    let mut current = None;
    for p in series.iter() {
        let week = p.time.week_start();
        match current {
            Some(w) if w == week => bucket.push(p.value),
            Some(w) => {
                out.push(PricePoint {
                    time: w,
                    value: reduce(&bucket),
                });
                bucket.clear();
                bucket.push(p.value);
                current = Some(week);
            }
            None => {
                bucket.push(p.value);
                current = Some(week);
            }
        }
    }
    if let Some(w) = current {
        out.push(PricePoint {
            time: w,
            value: reduce(&bucket),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::Day;
    use crate::series::normalizer::normalize_pairs;

    // 2024-05-12 is a Sunday.
    fn series() -> PriceSeries {
        normalize_pairs(vec![
            (Day::new(2024, 5, 10).unwrap(), 1.0), // Friday, week of 05-05
            (Day::new(2024, 5, 11).unwrap(), 2.0), // Saturday, week of 05-05
            (Day::new(2024, 5, 12).unwrap(), 3.0), // Sunday, new week
            (Day::new(2024, 5, 15).unwrap(), 4.0), // Wednesday, same week
            (Day::new(2024, 5, 20).unwrap(), 5.0), // Monday, week of 05-19
        ])
    }

    #[test]
    fn test_weekly_last() {
        let out = weekly_last(&series());
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].time, Day::new(2024, 5, 5).unwrap());
        assert_eq!(out[0].value, 2.0);
        assert_eq!(out[1].time, Day::new(2024, 5, 12).unwrap());
        assert_eq!(out[1].value, 4.0);
        assert_eq!(out[2].time, Day::new(2024, 5, 19).unwrap());
        assert_eq!(out[2].value, 5.0);
    }

    #[test]
    fn test_weekly_sum() {
        let out = weekly_sum(&series());
        let values: Vec<f64> = out.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![3.0, 7.0, 5.0]);
    }

    #[test]
    fn test_weekly_output_sorted() {
        let out = weekly_last(&series());
        assert!(out.windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn test_empty_series() {
        let empty = normalize_pairs(Vec::new());
        assert!(weekly_last(&empty).is_empty());
        assert!(weekly_sum(&empty).is_empty());
    }
}
