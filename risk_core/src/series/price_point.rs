use serde::{Deserialize, Serialize};

use crate::common::time::Day;

/// One daily observation. `value` must be positive; the normalizer enforces
/// this before any log-taking component runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: Day,
    pub value: f64,
}

/// One row of the risk computation, aligned 1:1 with the source series.
/// `deviation` is the damped pre-normalization score; `risk` is its min-max
/// normalization into [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPoint {
    pub time: Day,
    pub value: f64,
    pub moving_average: f64,
    pub deviation: f64,
    pub risk: f64,
}

/// A raw feed record. Upstream feeds deliver dates as ISO strings or epoch
/// numbers and closes as numbers or string-encoded numbers; both encodings
/// of both fields are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTick {
    pub date: RawDate,
    pub close: RawValue,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    Epoch(i64),
    Text(String),
}

impl RawDate {
    pub fn to_day(&self) -> Option<Day> {
        match self {
            RawDate::Epoch(ts) => Day::from_epoch(*ts),
            RawDate::Text(s) => Day::from_str(s).ok(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Num(f64),
    Text(String),
}

impl RawValue {
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            RawValue::Num(v) => Some(*v),
            RawValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_tick_accepts_mixed_encodings() {
        let json = r#"[
            {"date": "2020-01-01", "close": 100.5},
            {"date": 1577923200, "close": "90.25"}
        ]"#;
        let ticks: Vec<RawTick> = serde_json::from_str(json).unwrap();
        assert_eq!(ticks[0].date.to_day().unwrap(), Day::new(2020, 1, 1).unwrap());
        assert_eq!(ticks[0].close.to_f64(), Some(100.5));
        assert_eq!(ticks[1].date.to_day().unwrap(), Day::new(2020, 1, 2).unwrap());
        assert_eq!(ticks[1].close.to_f64(), Some(90.25));
    }

    #[test]
    fn test_raw_value_rejects_non_numeric() {
        assert_eq!(RawValue::Text("n/a".to_string()).to_f64(), None);
    }
}
