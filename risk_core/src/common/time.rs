use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::metric_exception::{ErrCode, MetricException};

/// Epoch values at or above this magnitude are taken as milliseconds.
const EPOCH_MILLIS_CUTOFF: i64 = 100_000_000_000;

/// A calendar date at day resolution. All series in the engine are keyed by
/// `Day`; the total order makes sort/dedup/join by date well-defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Day(NaiveDate);

impl Day {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Supports "YYYY-MM-DD", "YYYY/MM/DD", "YYYYMMDD" and epoch
    /// seconds/milliseconds (digits only).
    pub fn from_str(s: &str) -> Result<Self, MetricException> {
        let s = s.trim();
        if s.contains('-') {
            // ISO date, possibly with a trailing time component
            let date_part = s.split(&[' ', 'T'][..]).next().unwrap_or(s);
            return NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                .map(Self)
                .map_err(|e| {
                    MetricException::new(
                        format!("bad date {:?}: {}", s, e),
                        ErrCode::SrcDataFormatError,
                    )
                });
        }
        if s.contains('/') {
            return NaiveDate::parse_from_str(s, "%Y/%m/%d").map(Self).map_err(|e| {
                MetricException::new(
                    format!("bad date {:?}: {}", s, e),
                    ErrCode::SrcDataFormatError,
                )
            });
        }
        if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
            return NaiveDate::parse_from_str(s, "%Y%m%d").map(Self).map_err(|e| {
                MetricException::new(
                    format!("bad date {:?}: {}", s, e),
                    ErrCode::SrcDataFormatError,
                )
            });
        }
        let ts: i64 = s.parse().map_err(|_| {
            MetricException::new(format!("bad date {:?}", s), ErrCode::SrcDataFormatError)
        })?;
        Self::from_epoch(ts).ok_or_else(|| {
            MetricException::new(
                format!("epoch {} out of range", ts),
                ErrCode::SrcDataFormatError,
            )
        })
    }

    /// Epoch seconds or milliseconds, truncated to the UTC calendar day.
    pub fn from_epoch(ts: i64) -> Option<Self> {
        let secs = if ts.abs() >= EPOCH_MILLIS_CUTOFF {
            ts / 1000
        } else {
            ts
        };
        chrono::DateTime::from_timestamp(secs, 0).map(|dt| Self(dt.date_naive()))
    }

    /// The next calendar day.
    pub fn succ(&self) -> Self {
        Self(self.0 + Duration::days(1))
    }

    /// The Sunday that starts this day's week. Weeks run Sunday..Saturday,
    /// matching the upstream dashboard's `Date.getDay()` convention.
    pub fn week_start(&self) -> Self {
        let back = self.0.weekday().num_days_from_sunday() as i64;
        Self(self.0 - Duration::days(back))
    }

    pub fn to_str(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
