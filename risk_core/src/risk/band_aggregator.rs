use serde::Serialize;

use crate::common::metric_exception::{ErrCode, MetricException};
use crate::series::price_point::RiskPoint;

/// One fixed-width bucket of the risk range. Buckets are contiguous and
/// non-overlapping; their `day_count`s sum to the number of input points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandBucket {
    pub range_start: f64,
    pub range_end: f64,
    pub day_count: usize,
    pub percentage: f64,
}

/// Partition a risk series into `ceil(1 / width)` buckets and report
/// time-spent percentages. The boundary value `risk == 1.0` falls into the
/// last bucket. An empty input yields all-zero percentages, never NaN.
/// `width` outside `(0, 1]` is a parameter error.
pub fn aggregate(points: &[RiskPoint], width: f64) -> Result<Vec<BandBucket>, MetricException> {
    if !(width > 0.0 && width <= 1.0) {
        return Err(MetricException::new(
            format!("band width {} outside (0, 1]", width),
            ErrCode::ParaError,
        ));
    }
    let n = (1.0 / width).ceil() as usize;
    let mut counts = vec![0usize; n];
    for p in points {
        let idx = ((p.risk / width).floor() as usize).min(n - 1);
        counts[idx] += 1;
    }
    let total = points.len();
    Ok(counts
        .iter()
        .enumerate()
        .map(|(i, &day_count)| BandBucket {
            range_start: i as f64 * width,
            range_end: ((i + 1) as f64 * width).min(1.0),
            day_count,
            percentage: if total == 0 {
                0.0
            } else {
                100.0 * day_count as f64 / total as f64
            },
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::Day;

    fn risk_points(risks: &[f64]) -> Vec<RiskPoint> {
        let mut day = Day::new(2020, 1, 1).unwrap();
        let mut out = Vec::new();
        for &risk in risks {
            out.push(RiskPoint {
                time: day,
                value: 1.0,
                moving_average: 1.0,
                deviation: 0.0,
                risk,
            });
            day = day.succ();
        }
        out
    }

    #[test]
    fn test_bucket_assignment_and_percentages() {
        let points = risk_points(&[0.05, 0.15, 0.15, 0.95]);
        let buckets = aggregate(&points, 0.1).unwrap();
        assert_eq!(buckets.len(), 10);
        assert_eq!(buckets[0].day_count, 1);
        assert_eq!(buckets[1].day_count, 2);
        assert_eq!(buckets[9].day_count, 1);
        assert_eq!(buckets[0].percentage, 25.0);
        assert_eq!(buckets[1].percentage, 50.0);
    }

    #[test]
    fn test_boundary_one_lands_in_last_bucket() {
        let points = risk_points(&[1.0]);
        let buckets = aggregate(&points, 0.2).unwrap();
        assert_eq!(buckets.len(), 5);
        assert_eq!(buckets[4].day_count, 1);
    }

    #[test]
    fn test_day_counts_conserved_across_widths() {
        let risks: Vec<f64> = (0..97).map(|i| i as f64 / 96.0).collect();
        let points = risk_points(&risks);
        for width in [0.05, 0.1, 0.2, 1.0] {
            let buckets = aggregate(&points, width).unwrap();
            let total: usize = buckets.iter().map(|b| b.day_count).sum();
            assert_eq!(total, points.len(), "width {}", width);
        }
    }

    #[test]
    fn test_buckets_contiguous() {
        let buckets = aggregate(&risk_points(&[0.5]), 0.3).unwrap();
        // ceil(1 / 0.3) = 4 buckets, the last clipped at 1.0
        assert_eq!(buckets.len(), 4);
        for w in buckets.windows(2) {
            assert_eq!(w[0].range_end, w[1].range_start);
        }
        assert_eq!(buckets[0].range_start, 0.0);
        assert_eq!(buckets[3].range_end, 1.0);
    }

    #[test]
    fn test_empty_input_all_zero() {
        let buckets = aggregate(&[], 0.25).unwrap();
        assert_eq!(buckets.len(), 4);
        assert!(buckets.iter().all(|b| b.day_count == 0 && b.percentage == 0.0));
    }

    #[test]
    fn test_invalid_width() {
        assert!(aggregate(&[], 0.0).is_err());
        assert!(aggregate(&[], -0.1).is_err());
        assert!(aggregate(&[], 1.5).is_err());
        assert_eq!(
            aggregate(&[], 0.0).unwrap_err().errcode,
            ErrCode::ParaError
        );
    }
}
