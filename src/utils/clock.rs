use chrono::{DateTime, Local};

/// Represents an entity responsible for providing dates across application. This allows "today" to
/// be pinned during testing.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    /// Local wall clock time. Dates of entries are derived from it.
    fn now(&self) -> DateTime<Local>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
