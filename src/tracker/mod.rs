//! The tracker owns every project and keeps the storage in sync with it.
//!
//! Each mutating operation first validates and applies the change to the in-memory
//! [ProjectStore], then writes the whole mapping through [ProjectStorage]. Rejected input never
//! reaches the storage.

pub mod error;
pub mod ledger;
pub mod storage;
pub mod store;

use anyhow::Result;
use chrono::NaiveDate;
use storage::{entities::ProjectMapping, project_storage::ProjectStorage};
use store::ProjectStore;
use tracing::info;

use crate::analysis::week::WeekId;

pub struct TimeTracker<S> {
    storage: S,
    store: ProjectStore,
}

impl<S: ProjectStorage> TimeTracker<S> {
    /// Loads previously saved projects.
    pub async fn open(storage: S) -> Result<Self> {
        let projects = storage.load().await?;
        info!("Opened tracker with {} projects", projects.len());
        Ok(Self {
            storage,
            store: ProjectStore::new(projects),
        })
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn projects(&self) -> &ProjectMapping {
        self.store.projects()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn create_project(
        &mut self,
        name: &str,
        account_number: &str,
        comments: &str,
    ) -> Result<()> {
        self.store.create(name, account_number, comments)?;
        self.persist().await?;
        info!("Created project {name}");
        Ok(())
    }

    /// Returns the accumulated hours for the project on that date.
    pub async fn add_hours(&mut self, project: &str, date: NaiveDate, amount: f64) -> Result<f64> {
        let total = self.store.add_hours(project, date, amount)?;
        self.persist().await?;
        info!("Added {amount} hours for {project} on {date}, {total} in total");
        Ok(total)
    }

    /// Returns the number of removed entries.
    pub async fn clear_range(
        &mut self,
        project: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<usize> {
        let removed = self.store.clear_range(project, from, to);
        self.persist().await?;
        info!("Removed {removed} entries of {project} between {from} and {to}");
        Ok(removed)
    }

    /// Removes the entries of every project inside the week's Monday..Sunday span.
    pub async fn clear_week(&mut self, week: WeekId) -> Result<usize> {
        let (from, to) = week.date_range();
        let names = self.store.names().map(str::to_string).collect::<Vec<_>>();
        let removed = names
            .iter()
            .map(|name| self.store.clear_range(name, from, to))
            .sum::<usize>();
        self.persist().await?;
        info!("Cleared week {week}, {removed} entries removed");
        Ok(removed)
    }

    async fn persist(&self) -> Result<()> {
        self.storage.save(self.store.projects()).await
    }
}
