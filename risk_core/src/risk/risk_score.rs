use crate::common::metric_exception::{ErrCode, MetricException};
use crate::math::moving_average::trailing_mean;
use crate::risk::risk_config::RiskConfig;
use crate::series::price_point::RiskPoint;
use crate::series::price_series::PriceSeries;

/// Compute the [0, 1] risk score for a price series.
///
/// The algorithm is deliberately path-dependent, not memoryless:
/// 1. trailing moving average with window `min(window_cap, len / 2)`
///    (at least 1), under-windowed near the start of the series;
/// 2. raw deviation `(ln(value) - ln(ma)) * i^index_exponent`, zero at
///    index 0;
/// 3. a single forward damping scan driven by raw day-over-day price
///    ratios: spikes above `spike_threshold` are scaled back by the
///    reciprocal ratio, runs of declining days are amplified progressively
///    up to 2x at `decline_cap_days` consecutive declines;
/// 4. global min-max normalization into [0, 1].
///
/// Output aligns 1:1 with the input. Fewer than two points is not enough
/// data and yields an empty result. A flat deviation range cannot be
/// normalized and is reported as `DegenerateRange`; a non-positive price
/// (which the normalizer filters upstream) as `NonPositiveValue`.
pub fn risk_series(
    series: &PriceSeries,
    config: &RiskConfig,
) -> Result<Vec<RiskPoint>, MetricException> {
    let pts = series.points();
    if pts.len() < 2 {
        return Ok(Vec::new());
    }
    if let Some(p) = pts.iter().find(|p| p.value <= 0.0) {
        return Err(MetricException::new(
            format!("non-positive price {} at {}", p.value, p.time),
            ErrCode::NonPositiveValue,
        ));
    }

    let values: Vec<f64> = pts.iter().map(|p| p.value).collect();
    let (ma, deviation) = damped_deviation(&values, config);

    let min = deviation.iter().copied().fold(f64::INFINITY, f64::min);
    let max = deviation.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == min {
        return Err(MetricException::new(
            format!("deviation range is degenerate (all {})", min),
            ErrCode::DegenerateRange,
        ));
    }

    Ok(pts
        .iter()
        .enumerate()
        .map(|(i, p)| RiskPoint {
            time: p.time,
            value: p.value,
            moving_average: ma[i],
            deviation: deviation[i],
            risk: (deviation[i] - min) / (max - min),
        })
        .collect())
}

/// Steps 1-3: trailing mean and the damped deviation series. The damping
/// decisions depend on the raw prices of the previous day, never on the
/// damped values themselves.
fn damped_deviation(values: &[f64], config: &RiskConfig) -> (Vec<f64>, Vec<f64>) {
    let m = config.window_cap.min(values.len() / 2).max(1);
    let ma = trailing_mean(values, m);
    let mut deviation = vec![0.0; values.len()];
    let mut decline_run = 0u32;
    for i in 1..values.len() {
        let mut d = (values[i].ln() - ma[i].ln()) * (i as f64).powf(config.index_exponent);
        let ratio = values[i] / values[i - 1];
        if ratio > config.spike_threshold {
            d /= ratio;
            decline_run = 0;
        } else if ratio < 1.0 {
            decline_run += 1;
            d *= 1.0 + (decline_run as f64 / config.decline_cap_days as f64).min(1.0);
        } else {
            decline_run = 0;
        }
        deviation[i] = d;
    }
    (ma, deviation)
}
