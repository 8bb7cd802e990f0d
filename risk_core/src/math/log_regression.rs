use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::common::metric_exception::{ErrCode, MetricException};
use crate::series::price_point::PricePoint;
use crate::series::price_series::PriceSeries;

/// Least-squares fit of `ln(value)` on `ln(index + 1)`, reused to generate
/// every band of a family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionCoefficients {
    pub slope: f64,
    pub intercept: f64,
}

/// Per-band tuning tuple. These are empirically tuned constants, defined by
/// the caller; the fitter itself hardcodes nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSpec {
    pub name: String,
    pub scale: f64,
    pub shift_days: i64,
    pub curve_exponent: f64,
}

/// Family-level parameters shared by every band: the slope/intercept
/// adjustment, the forward extrapolation horizon and the band tuples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandFamilyConfig {
    pub slope_offset: f64,
    pub intercept_offset: f64,
    pub horizon_days: usize,
    pub bands: Vec<BandSpec>,
}

impl BandFamilyConfig {
    /// Sample presets tuned against Bitcoin's price history. These are not
    /// general-purpose defaults; other assets need their own tuning.
    pub fn btc_preset() -> Self {
        Self {
            slope_offset: 0.0,
            intercept_offset: 0.0,
            horizon_days: 730,
            bands: vec![
                BandSpec {
                    name: "upper".to_string(),
                    scale: 3.2,
                    shift_days: 0,
                    curve_exponent: 1.0,
                },
                BandSpec {
                    name: "mid".to_string(),
                    scale: 1.0,
                    shift_days: 0,
                    curve_exponent: 1.0,
                },
                BandSpec {
                    name: "lower".to_string(),
                    scale: 0.45,
                    shift_days: 120,
                    curve_exponent: 0.98,
                },
            ],
        }
    }

    pub fn band(&self, name: &str) -> Option<&BandSpec> {
        self.bands.iter().find(|b| b.name == name)
    }
}

/// Closed-form OLS over the full series: `ln(value) ~ slope * ln(i + 1) +
/// intercept`, `i` the 0-based position (calendar gaps count one step).
/// Fewer than two points is not enough data and yields `None`; a
/// non-positive value is a precondition violation the normalizer should
/// have filtered.
pub fn fit(series: &PriceSeries) -> Result<Option<RegressionCoefficients>, MetricException> {
    let pts = series.points();
    if pts.len() < 2 {
        return Ok(None);
    }
    if let Some(p) = pts.iter().find(|p| p.value <= 0.0) {
        return Err(MetricException::new(
            format!("non-positive price {} at {}", p.value, p.time),
            ErrCode::NonPositiveValue,
        ));
    }
    let n = pts.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_xy = 0.0;
    for (i, p) in pts.iter().enumerate() {
        let x = ((i + 1) as f64).ln();
        let y = p.value.ln();
        sum_x += x;
        sum_y += y;
        sum_xx += x * x;
        sum_xy += x * y;
    }
    let denom = n * sum_xx - sum_x * sum_x;
    if denom == 0.0 {
        return Ok(None);
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    Ok(Some(RegressionCoefficients { slope, intercept }))
}

/// One band of fitted values over the real date axis extended `horizon_days`
/// past the last known date at daily cadence. The combined axis is deduped
/// and re-sorted before values are computed. Indices whose shifted log
/// argument is non-positive, or whose value comes out non-finite, are
/// omitted.
pub fn band_series(
    series: &PriceSeries,
    coeffs: RegressionCoefficients,
    family: &BandFamilyConfig,
    spec: &BandSpec,
) -> Vec<PricePoint> {
    let mut axis: Vec<_> = series.iter().map(|p| p.time).collect();
    if let Some(last) = series.last() {
        let mut day = last.time;
        for _ in 0..family.horizon_days {
            day = day.succ();
            axis.push(day);
        }
    }
    axis.sort();
    axis.dedup();

    let adjusted_slope = coeffs.slope + family.slope_offset;
    let delta = coeffs.intercept - family.intercept_offset;
    let mut out = Vec::with_capacity(axis.len());
    for (i, day) in axis.into_iter().enumerate() {
        let arg = i as f64 - spec.shift_days as f64 + 1.0;
        if arg <= 0.0 {
            continue;
        }
        let x = arg.ln().powf(spec.curve_exponent);
        let value = (adjusted_slope * x + delta).exp() * spec.scale;
        if value.is_finite() {
            out.push(PricePoint { time: day, value });
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum ValuationKind {
    #[strum(serialize = "Overvaluation")]
    Overvaluation,
    #[strum(serialize = "Undervaluation")]
    Undervaluation,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Valuation {
    pub percent: f64,
    pub kind: ValuationKind,
}

/// Percentage distance of the latest real price from the fair-value band at
/// the same date. `None` when the series is empty or the band has no point
/// at the latest real date.
pub fn valuation(series: &PriceSeries, fair_band: &[PricePoint]) -> Option<Valuation> {
    let latest = series.last()?;
    let fair = fair_band
        .binary_search_by(|p| p.time.cmp(&latest.time))
        .ok()
        .map(|i| fair_band[i].value)?;
    let percent = (latest.value - fair) / fair * 100.0;
    let kind = if percent > 0.0 {
        ValuationKind::Overvaluation
    } else {
        ValuationKind::Undervaluation
    };
    Some(Valuation { percent, kind })
}
