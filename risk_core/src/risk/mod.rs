pub mod band_aggregator;
pub mod risk_config;
pub mod risk_score;
