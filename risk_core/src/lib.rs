pub mod common;
pub mod config;
pub mod convert;
pub mod math;
pub mod risk;
pub mod series;

pub use common::metric_exception::{ErrCode, MetricException};
pub use common::time::Day;
pub use config::engine_config::EngineConfig;
pub use risk::risk_config::RiskConfig;
pub use series::price_series::PriceSeries;
