use tracing::warn;

use super::{
    error::TrackerError,
    storage::entities::{ProjectMapping, ProjectRecord},
};

/// In-memory view of every project. Owned by [TimeTracker](super::TimeTracker), which persists it
/// after each mutation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProjectStore {
    pub(super) projects: ProjectMapping,
}

impl ProjectStore {
    pub fn new(projects: ProjectMapping) -> Self {
        Self { projects }
    }

    pub fn projects(&self) -> &ProjectMapping {
        &self.projects
    }

    pub fn into_projects(self) -> ProjectMapping {
        self.projects
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Adds a project with no hours. Names are case sensitive and must be unique.
    pub fn create(
        &mut self,
        name: &str,
        account_number: &str,
        comments: &str,
    ) -> Result<&ProjectRecord, TrackerError> {
        if name.is_empty() {
            warn!("Rejected project with an empty name");
            return Err(TrackerError::EmptyName);
        }
        if self.projects.contains_key(name) {
            warn!("Rejected duplicate project {name}");
            return Err(TrackerError::AlreadyExists(name.to_string()));
        }

        let (index, _) = self
            .projects
            .insert_full(name.to_string(), ProjectRecord::new(account_number, comments));
        Ok(&self.projects[index])
    }

    /// Projects in the order they were created.
    pub fn list(&self) -> impl Iterator<Item = (&str, &ProjectRecord)> {
        self.projects.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Result<&ProjectRecord, TrackerError> {
        self.projects
            .get(name)
            .ok_or_else(|| TrackerError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::tracker::{error::TrackerError, storage::entities::ProjectRecord};

    use super::ProjectStore;

    #[test]
    fn test_create_project() {
        let mut store = ProjectStore::default();

        let record = store.create("Acme", "123", "").unwrap();
        assert_eq!(*record, ProjectRecord::new("123", ""));
        assert!(record.hours.is_empty());
        assert_eq!(store.get("Acme").unwrap().account_number.as_deref(), Some("123"));
    }

    #[test]
    fn test_create_duplicate_leaves_store_unchanged() {
        let mut store = ProjectStore::default();
        store.create("Acme", "123", "").unwrap();
        let before = store.clone();

        assert_eq!(
            store.create("Acme", "456", "x"),
            Err(TrackerError::AlreadyExists("Acme".into()))
        );
        assert_eq!(store, before);
    }

    #[test]
    fn test_create_empty_name() {
        let mut store = ProjectStore::default();

        assert_eq!(store.create("", "1", "2"), Err(TrackerError::EmptyName));
        assert!(store.is_empty());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut store = ProjectStore::default();
        store.create("Acme", "", "").unwrap();
        store.create("acme", "", "").unwrap();

        assert_eq!(store.names().collect::<Vec<_>>(), ["Acme", "acme"]);
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let mut store = ProjectStore::default();
        for name in ["Zeta", "Alpha", "Mid"] {
            store.create(name, "", "").unwrap();
        }

        let names = store.list().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_get_missing() {
        let store = ProjectStore::default();
        assert_eq!(store.get("Nope"), Err(TrackerError::NotFound("Nope".into())));
    }
}
