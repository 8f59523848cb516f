//! Project list session.
//!
//! # Responsibility
//! - Hold the listing shown by the project selection view.
//! - Trim titles before create/rename and guard deletion with confirmation.
//!
//! # Invariants
//! - The listing is re-read from the store after every mutation.
//! - Blank titles never reach the store.

use crate::model::project::{validate_title, Project, ProjectId};
use crate::repo::project_store::{ProjectRepository, StoreResult};

/// Listing state for the project selection view.
pub struct ProjectListSession<'store, R: ProjectRepository + ?Sized> {
    store: &'store R,
    projects: Vec<Project>,
}

impl<'store, R: ProjectRepository + ?Sized> ProjectListSession<'store, R> {
    /// Loads the current listing.
    pub fn open(store: &'store R) -> StoreResult<Self> {
        let projects = store.list_projects()?;
        Ok(Self { store, projects })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Re-reads the listing from the store.
    pub fn refresh(&mut self) -> StoreResult<()> {
        self.projects = self.store.list_projects()?;
        Ok(())
    }

    /// Creates a project from a trimmed title.
    pub fn create_project(&mut self, title: &str) -> StoreResult<Project> {
        let title = title.trim();
        validate_title(title)?;
        let project = self.store.create_project(title)?;
        self.refresh()?;
        Ok(project)
    }

    /// Renames a project to a trimmed title.
    pub fn rename_project(&mut self, id: &ProjectId, title: &str) -> StoreResult<()> {
        let title = title.trim();
        validate_title(title)?;
        self.store.rename_project(id, title)?;
        self.refresh()
    }

    /// Deletes a project after `confirm` approves it.
    ///
    /// Returns `Ok(false)` when the id is not listed or the user declined.
    pub fn delete_project(
        &mut self,
        id: &ProjectId,
        confirm: impl FnOnce(&Project) -> bool,
    ) -> StoreResult<bool> {
        let Some(target) = self.projects.iter().find(|project| project.id == *id) else {
            return Ok(false);
        };
        if !confirm(target) {
            return Ok(false);
        }
        self.store.delete_project(id)?;
        self.refresh()?;
        Ok(true)
    }
}
