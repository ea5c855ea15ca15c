//! Daily price history

use super::lenient;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of a symbol's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Trading date, `YYYY-MM-DD` as sent by the service
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub open: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub high: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub low: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub close: f64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub volume: u64,
}

impl TimeSeriesPoint {
    pub fn new(date: impl Into<String>, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date: date.into(),
            open: None,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn with_open(mut self, open: f64) -> Self {
        self.open = Some(open);
        self
    }

    /// Parse the leading `YYYY-MM-DD` part of the date, if any
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_day(&self.date)
    }
}

pub(crate) fn parse_day(date: &str) -> Option<NaiveDate> {
    let day = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Order a series oldest-first
///
/// The service returns stored history newest-first. Points are re-ordered
/// only when every date parses; otherwise the service order is kept.
pub fn sort_chronologically(points: &mut [TimeSeriesPoint]) {
    if points.iter().all(|p| p.parsed_date().is_some()) {
        points.sort_by_key(TimeSeriesPoint::parsed_date);
    }
}
