//! JSON project store over a key-value backend.
//!
//! # Responsibility
//! - Load and save the full project list under `StoreConfig::namespace_key`.
//! - Recompute `word_count` and `last_modified` on every mutation.
//!
//! # Invariants
//! - A missing or unparsable payload reads as an empty collection.
//! - Chapter changes only enter through `replace_chapters` (whole-list swap).
//! - Two stores sharing one backend overwrite each other; last write wins.
//!
//! # Limitations
//! - The payload has no schema version; changing its shape breaks old data.
//! - An unparsable payload is overwritten by the next successful mutation.

use crate::config::{format_date, Clock, StoreConfig, SystemClock};
use crate::model::project::{
    validate_title, Chapter, Project, ProjectId, ProjectValidationError,
};
use crate::storage::{KeyValueStore, StorageError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for project store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from project store operations.
#[derive(Debug)]
pub enum StoreError {
    /// User input rejected before any write.
    Validation(ProjectValidationError),
    /// Backend read/write failure.
    Storage(StorageError),
    /// Collection could not be serialized.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode project list: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<ProjectValidationError> for StoreError {
    fn from(value: ProjectValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Contract between sessions and the durable project collection.
pub trait ProjectRepository {
    /// Returns every project, or an empty list when nothing readable is stored.
    fn list_projects(&self) -> StoreResult<Vec<Project>>;
    /// Returns one project by id.
    fn get_project(&self, id: &ProjectId) -> StoreResult<Option<Project>>;
    /// Creates and persists an empty project.
    fn create_project(&self, title: &str) -> StoreResult<Project>;
    /// Removes one project. Unknown ids are ignored.
    fn delete_project(&self, id: &ProjectId) -> StoreResult<()>;
    /// Renames one project. Unknown ids are ignored.
    fn rename_project(&self, id: &ProjectId, title: &str) -> StoreResult<()>;
    /// Swaps a project's whole chapter list. Unknown ids are ignored.
    fn replace_chapters(&self, project_id: &ProjectId, chapters: &[Chapter]) -> StoreResult<()>;
}

/// Project store persisting through any `KeyValueStore`.
pub struct ProjectStore<S: KeyValueStore> {
    backend: S,
    config: StoreConfig,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStore> ProjectStore<S> {
    /// Creates a store stamping dates from the system clock.
    pub fn new(backend: S, config: StoreConfig) -> Self {
        Self::with_clock(backend, config, SystemClock)
    }

    /// Creates a store with an explicit date source.
    pub fn with_clock(backend: S, config: StoreConfig, clock: impl Clock + 'static) -> Self {
        Self {
            backend,
            config,
            clock: Box::new(clock),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn today(&self) -> String {
        format_date(self.clock.today())
    }

    fn load_all(&self) -> StoreResult<Vec<Project>> {
        let key = self.config.namespace_key.as_str();
        let Some(payload) = self.backend.load(key)? else {
            debug!("event=store_load module=store status=empty key={key}");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Project>>(&payload) {
            Ok(projects) => Ok(projects),
            Err(err) => {
                warn!(
                    "event=store_load module=store status=malformed key={key} payload_bytes={} {}",
                    payload.len(),
                    parse_error_fields(&err)
                );
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&self, projects: &[Project]) -> StoreResult<()> {
        let payload = serde_json::to_string(projects).map_err(StoreError::Encode)?;
        self.backend
            .save(self.config.namespace_key.as_str(), &payload)?;
        Ok(())
    }

    /// Runs one read-modify-write cycle. `mutate` reports whether anything changed.
    fn mutate(&self, mutate: impl FnOnce(&mut Vec<Project>) -> bool) -> StoreResult<bool> {
        let mut projects = self.load_all()?;
        if !mutate(&mut projects) {
            return Ok(false);
        }
        self.save_all(&projects)?;
        Ok(true)
    }
}

impl<S: KeyValueStore> ProjectRepository for ProjectStore<S> {
    fn list_projects(&self) -> StoreResult<Vec<Project>> {
        self.load_all()
    }

    fn get_project(&self, id: &ProjectId) -> StoreResult<Option<Project>> {
        Ok(self
            .load_all()?
            .into_iter()
            .find(|project| project.id == *id))
    }

    fn create_project(&self, title: &str) -> StoreResult<Project> {
        validate_title(title)?;
        let project = Project::new(title, self.today());
        let created = project.clone();
        self.mutate(move |projects| {
            projects.push(project);
            true
        })?;
        info!(
            "event=project_create module=store status=ok project_id={}",
            created.id
        );
        Ok(created)
    }

    fn delete_project(&self, id: &ProjectId) -> StoreResult<()> {
        let deleted = self.mutate(|projects| {
            let before = projects.len();
            projects.retain(|project| project.id != *id);
            projects.len() != before
        })?;
        info!(
            "event=project_delete module=store status={} project_id={id}",
            outcome(deleted)
        );
        Ok(())
    }

    fn rename_project(&self, id: &ProjectId, title: &str) -> StoreResult<()> {
        validate_title(title)?;
        let today = self.today();
        let renamed = self.mutate(|projects| {
            match projects.iter_mut().find(|project| project.id == *id) {
                Some(project) => {
                    project.rename(title, today);
                    true
                }
                None => false,
            }
        })?;
        info!(
            "event=project_rename module=store status={} project_id={id}",
            outcome(renamed)
        );
        Ok(())
    }

    fn replace_chapters(&self, project_id: &ProjectId, chapters: &[Chapter]) -> StoreResult<()> {
        let today = self.today();
        let replaced = self.mutate(|projects| {
            match projects.iter_mut().find(|project| project.id == *project_id) {
                Some(project) => {
                    project.set_chapters(chapters.to_vec(), today);
                    true
                }
                None => false,
            }
        })?;
        debug!(
            "event=chapters_replace module=store status={} project_id={project_id} chapter_count={}",
            outcome(replaced),
            chapters.len()
        );
        Ok(())
    }
}

/// Log fields locating a parse failure. serde_json messages quote payload
/// values, so only the category and position are kept.
fn parse_error_fields(err: &serde_json::Error) -> String {
    format!(
        "error_category={:?} line={} column={}",
        err.classify(),
        err.line(),
        err.column()
    )
}

fn outcome(changed: bool) -> &'static str {
    if changed {
        "ok"
    } else {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_error_fields, ProjectRepository, ProjectStore, StoreError};
    use crate::config::{FixedClock, StoreConfig};
    use crate::model::project::{Chapter, Project, ProjectId, ProjectValidationError};
    use crate::storage::{KeyValueStore, MemoryKeyValueStore};
    use chrono::NaiveDate;

    fn store() -> ProjectStore<MemoryKeyValueStore> {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        ProjectStore::with_clock(
            MemoryKeyValueStore::new(),
            StoreConfig::default(),
            FixedClock(date),
        )
    }

    #[test]
    fn blank_titles_are_rejected_without_writing() {
        let store = store();
        let err = store.create_project("   ").unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ProjectValidationError::BlankTitle)
        ));
        assert!(store.backend().is_empty());
    }

    #[test]
    fn unknown_ids_do_not_write() {
        let store = store();
        store
            .replace_chapters(&ProjectId::generate(), &[Chapter::new("x", 0)])
            .unwrap();
        store.delete_project(&ProjectId::generate()).unwrap();
        assert!(store.backend().is_empty());
    }

    #[test]
    fn namespace_key_selects_payload_slot() {
        let store = ProjectStore::new(
            MemoryKeyValueStore::new(),
            StoreConfig::with_namespace_key("custom_projects"),
        );
        store.create_project("p").unwrap();
        assert!(store.backend().load("custom_projects").unwrap().is_some());
        assert!(store.backend().load("zhixia_projects").unwrap().is_none());
    }

    #[test]
    fn parse_error_fields_omit_payload_text() {
        let payload = r#"[{"id":"p","title":"t","lastModified":"2024-05-01","wordCount":0,
            "chapters":[{"id":"c","title":"t","content":"","order":"开篇之夜"}]}]"#;
        let err = serde_json::from_str::<Vec<Project>>(payload).unwrap_err();
        assert!(err.to_string().contains("开篇之夜"));

        let fields = parse_error_fields(&err);
        assert!(!fields.contains("开篇之夜"));
        assert!(fields.starts_with("error_category=Data line=2"));
    }
}
