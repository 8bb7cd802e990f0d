use crate::series::price_point::PricePoint;
use crate::series::price_series::PriceSeries;

/// Simple moving average over a fixed window. The first output lands at
/// `series[w-1].time`, so the result has `len - w + 1` points; a window of
/// zero or one larger than the series yields an empty result, not an error.
pub fn sma(series: &PriceSeries, window: usize) -> Vec<PricePoint> {
    let pts = series.points();
    if window == 0 || window > pts.len() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(pts.len() - window + 1);
    let mut sum: f64 = pts[..window].iter().map(|p| p.value).sum();
    out.push(PricePoint {
        time: pts[window - 1].time,
        value: sum / window as f64,
    });
    for i in window..pts.len() {
        sum += pts[i].value - pts[i - window].value;
        out.push(PricePoint {
            time: pts[i].time,
            value: sum / window as f64,
        });
    }
    out
}

/// Exponential moving average. Seeded with the simple mean of the first `w`
/// points (emitted at `series[w-1].time`), then
/// `ema = value * k + prev * (1 - k)` with `k = 2 / (w + 1)`.
pub fn ema(series: &PriceSeries, window: usize) -> Vec<PricePoint> {
    let pts = series.points();
    if window == 0 || window > pts.len() {
        return Vec::new();
    }
    let k = 2.0 / (window as f64 + 1.0);
    let seed: f64 = pts[..window].iter().map(|p| p.value).sum::<f64>() / window as f64;
    let mut out = Vec::with_capacity(pts.len() - window + 1);
    out.push(PricePoint {
        time: pts[window - 1].time,
        value: seed,
    });
    let mut prev = seed;
    for p in &pts[window..] {
        prev = p.value * k + prev * (1.0 - k);
        out.push(PricePoint {
            time: p.time,
            value: prev,
        });
    }
    out
}

/// Growing/bounded trailing mean: at index `i` the mean of the last
/// `min(i + 1, cap)` values. The early part of the series is under-windowed
/// by design, no padding. One output per input value.
pub fn trailing_mean(values: &[f64], cap: usize) -> Vec<f64> {
    if cap == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= cap {
            sum -= values[i - cap];
        }
        let n = (i + 1).min(cap);
        out.push(sum / n as f64);
    }
    out
}
