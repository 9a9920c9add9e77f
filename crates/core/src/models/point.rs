use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single observation (date → value) as returned by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl DataPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// Build a point from a unix timestamp in seconds, dropping the time of day.
    pub fn from_unix_seconds(ts: i64, value: f64) -> Option<Self> {
        DateTime::from_timestamp(ts, 0).map(|dt| Self::new(dt.date_naive(), value))
    }
}
