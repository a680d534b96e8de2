//! Hours bookkeeping on top of [ProjectStore]. Every project owns a ledger of date -> hours and
//! hours for the same date always accumulate.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::utils::time::date_to_record_name;

use super::{error::TrackerError, storage::entities::ProjectRecord, store::ProjectStore};

impl ProjectStore {
    /// Adds `amount` to whatever was already recorded for the project on `date` and returns the
    /// new total. Unknown projects are created on the fly without an account number or comments.
    pub fn add_hours(
        &mut self,
        project: &str,
        date: NaiveDate,
        amount: f64,
    ) -> Result<f64, TrackerError> {
        if !amount.is_finite() || amount <= 0. {
            warn!("Rejected {amount} hours for {project}");
            return Err(TrackerError::InvalidAmount(amount));
        }
        if project.is_empty() {
            return Err(TrackerError::EmptyName);
        }

        let record = self
            .projects
            .entry(project.to_string())
            .or_insert_with(|| {
                info!("Project {project} doesn't exist yet, creating it");
                ProjectRecord::default()
            });
        let total = record.hours.entry(date_to_record_name(date)).or_insert(0.);
        *total += amount;
        Ok(*total)
    }

    /// Removes every entry of `project` with `from <= date <= to` and returns how many were
    /// removed. Dates are compared as `YYYY-MM-DD` strings.
    pub fn clear_range(&mut self, project: &str, from: NaiveDate, to: NaiveDate) -> usize {
        let Some(record) = self.projects.get_mut(project) else {
            debug!("Nothing to clear for unknown project {project}");
            return 0;
        };
        let from = date_to_record_name(from);
        let to = date_to_record_name(to);

        let before = record.hours.len();
        record
            .hours
            .retain(|date, _| !(from.as_str() <= date.as_str() && date.as_str() <= to.as_str()));
        before - record.hours.len()
    }
}
