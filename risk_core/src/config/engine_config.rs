use std::collections::HashMap;

use serde_json::Value;

use crate::common::metric_exception::{ErrCode, MetricException};
use crate::math::log_regression::BandFamilyConfig;
use crate::risk::risk_config::RiskConfig;

/// The full tunable surface of the engine: the risk-model constants, the
/// aggregation band width, the moving-average overlay windows and the
/// regression band family.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub risk: RiskConfig,
    pub band_width: f64,
    pub ma_windows: Vec<usize>,
    pub regression: BandFamilyConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            risk: RiskConfig::default(),
            band_width: 0.1,
            ma_windows: vec![50, 350],
            regression: BandFamilyConfig::btc_preset(),
        }
    }
}

impl EngineConfig {
    /// Build from a loose key/value map (e.g. JSON config fed through by
    /// the host). Unknown keys and out-of-range values are parameter
    /// errors, not silent defaults.
    pub fn new(conf: Option<HashMap<String, Value>>) -> Result<Self, MetricException> {
        let mut config = Self::default();
        for (k, v) in conf.unwrap_or_default() {
            match k.as_str() {
                "window_cap" => config.risk.window_cap = usize_para(&k, &v)?,
                "index_exponent" => config.risk.index_exponent = f64_para(&k, &v)?,
                "spike_threshold" => config.risk.spike_threshold = f64_para(&k, &v)?,
                "decline_cap_days" => config.risk.decline_cap_days = usize_para(&k, &v)? as u32,
                "band_width" => config.band_width = f64_para(&k, &v)?,
                "horizon_days" => config.regression.horizon_days = usize_para(&k, &v)?,
                "slope_offset" => config.regression.slope_offset = f64_para(&k, &v)?,
                "intercept_offset" => config.regression.intercept_offset = f64_para(&k, &v)?,
                "ma_windows" => {
                    let arr = v.as_array().ok_or_else(|| para_err(&k, &v))?;
                    config.ma_windows = arr
                        .iter()
                        .map(|w| w.as_u64().map(|w| w as usize).ok_or_else(|| para_err(&k, w)))
                        .collect::<Result<_, _>>()?;
                }
                _ => {
                    return Err(MetricException::new(
                        format!("unknown para = {}", k),
                        ErrCode::ParaError,
                    ))
                }
            }
        }
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), MetricException> {
        if !(self.band_width > 0.0 && self.band_width <= 1.0) {
            return Err(MetricException::new(
                format!("band_width {} outside (0, 1]", self.band_width),
                ErrCode::ParaError,
            ));
        }
        if self.risk.window_cap == 0 {
            return Err(MetricException::new("window_cap must be >= 1", ErrCode::ParaError));
        }
        if self.ma_windows.iter().any(|&w| w == 0) {
            return Err(MetricException::new("ma_windows must be >= 1", ErrCode::ParaError));
        }
        Ok(())
    }
}

fn para_err(key: &str, value: &Value) -> MetricException {
    MetricException::new(format!("bad value for {} = {}", key, value), ErrCode::ParaError)
}

fn usize_para(key: &str, value: &Value) -> Result<usize, MetricException> {
    value
        .as_u64()
        .map(|v| v as usize)
        .ok_or_else(|| para_err(key, value))
}

fn f64_para(key: &str, value: &Value) -> Result<f64, MetricException> {
    value.as_f64().ok_or_else(|| para_err(key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_surface() {
        let config = EngineConfig::new(None).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.risk.window_cap, 373);
        assert_eq!(config.band_width, 0.1);
    }

    #[test]
    fn test_overrides() {
        let mut conf = HashMap::new();
        conf.insert("window_cap".to_string(), Value::from(200));
        conf.insert("band_width".to_string(), Value::from(0.05));
        conf.insert("ma_windows".to_string(), Value::from(vec![20, 100]));
        let config = EngineConfig::new(Some(conf)).unwrap();
        assert_eq!(config.risk.window_cap, 200);
        assert_eq!(config.band_width, 0.05);
        assert_eq!(config.ma_windows, vec![20, 100]);
        // untouched keys keep their defaults
        assert_eq!(config.risk.spike_threshold, 1.5);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut conf = HashMap::new();
        conf.insert("windw_cap".to_string(), Value::from(200));
        let err = EngineConfig::new(Some(conf)).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ParaError);
    }

    #[test]
    fn test_out_of_range_band_width_rejected() {
        let mut conf = HashMap::new();
        conf.insert("band_width".to_string(), Value::from(1.5));
        assert!(EngineConfig::new(Some(conf)).is_err());
    }

    #[test]
    fn test_bad_type_rejected() {
        let mut conf = HashMap::new();
        conf.insert("window_cap".to_string(), Value::from("lots"));
        assert!(EngineConfig::new(Some(conf)).is_err());
    }
}
