pub mod log_regression;
pub mod moving_average;
pub mod resample;
