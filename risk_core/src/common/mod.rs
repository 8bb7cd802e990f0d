pub mod metric_exception;
pub mod time;
