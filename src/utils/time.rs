use chrono::{Datelike, Duration, NaiveDate};

use crate::tracker::error::TrackerError;

/// This is the standard way of converting a date to a ledger key in timeplanner.
pub fn date_to_record_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a canonical `YYYY-MM-DD` ledger key. Keys that chrono accepts but that aren't written
/// back the same way, like `2024-1-8`, are rejected since range clearing compares raw keys.
pub fn record_name_to_date(value: &str) -> Result<NaiveDate, TrackerError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .filter(|date| date_to_record_name(*date) == value)
        .ok_or_else(|| TrackerError::InvalidDate(value.to_string()))
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}
