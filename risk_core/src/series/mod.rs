pub mod normalizer;
pub mod price_point;
pub mod price_series;
