use chrono::NaiveDate;
use thiserror::Error;

/// Rejected user input. Whenever one of these is returned, nothing was mutated and nothing was
/// written to disk.
#[derive(Debug, Error, PartialEq)]
pub enum TrackerError {
    #[error("Project name can't be empty")]
    EmptyName,
    #[error("Project '{0}' already exists")]
    AlreadyExists(String),
    #[error("Project '{0}' doesn't exist")]
    NotFound(String),
    #[error("Hours worked must be greater than 0, got {0}")]
    InvalidAmount(f64),
    #[error("Can't parse '{0}' as a YYYY-MM-DD date")]
    InvalidDate(String),
    #[error("Can't parse '{0}' as a YYYY-Www week")]
    InvalidWeek(String),
    #[error("Date {date} is outside of the allowed range {earliest}..={latest}")]
    DateOutOfRange {
        date: NaiveDate,
        earliest: NaiveDate,
        latest: NaiveDate,
    },
}
