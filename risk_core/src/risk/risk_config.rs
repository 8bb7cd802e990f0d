use serde::{Deserialize, Serialize};

/// Tuned constants of the risk model. The defaults pin the published model;
/// changing any of them changes the metric, so tests assert on the exact
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Upper bound on the trailing moving-average window, in days.
    pub window_cap: usize,
    /// Exponent applied to the 0-based index when weighting the log
    /// deviation.
    pub index_exponent: f64,
    /// Day-over-day price ratio above which the spike-damping branch fires.
    pub spike_threshold: f64,
    /// Number of consecutive decline days at which the decline
    /// amplification saturates.
    pub decline_cap_days: u32,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            window_cap: 373,
            index_exponent: 0.395,
            spike_threshold: 1.5,
            decline_cap_days: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pins_published_model() {
        let c = RiskConfig::default();
        assert_eq!(c.window_cap, 373);
        assert_eq!(c.index_exponent, 0.395);
        assert_eq!(c.spike_threshold, 1.5);
        assert_eq!(c.decline_cap_days, 30);
    }
}
