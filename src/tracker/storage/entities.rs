use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Hours per `YYYY-MM-DD` date. Keys are canonical, so string order is also chronological order.
pub type HoursLedger = BTreeMap<String, f64>;

/// Every project keyed by its name, in the order projects were created.
pub type ProjectMapping = IndexMap<String, ProjectRecord>;

/// The struct used for storing a project on the disk.
///
/// Projects that were implicitly created by adding hours don't carry an account number or
/// comments, so those stay optional and are omitted from the file when absent.
#[derive(PartialEq, Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProjectRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default)]
    pub hours: HoursLedger,
}

impl ProjectRecord {
    pub fn new(account_number: impl Into<String>, comments: impl Into<String>) -> Self {
        Self {
            account_number: Some(account_number.into()),
            comments: Some(comments.into()),
            hours: HoursLedger::new(),
        }
    }

    /// Hours recorded for a date, 0 when there are none.
    pub fn hours_on(&self, date: &str) -> f64 {
        self.hours.get(date).copied().unwrap_or(0.)
    }

    pub fn with_hours(self, date: impl Into<String>, hours: f64) -> Self {
        let mut record = self;
        record.hours.insert(date.into(), hours);
        record
    }
}
