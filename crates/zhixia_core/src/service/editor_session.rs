//! Editor session over one project's chapters.
//!
//! # Responsibility
//! - Hold a working copy of one project's chapters and the current selection.
//! - Push every chapter change to the store as a whole-list replacement.
//!
//! # Invariants
//! - The store is written before the working copy is updated; a failed write
//!   leaves the session unchanged.
//! - Chapter `order` is dense and zero-based after `delete_chapter`.
//! - The selected chapter is always read from the working copy, never cached.
//! - Display sorting never touches `order` or the store.

use crate::model::chapter_order::{
    first_in_order, next_order, renumber, sorted_view, SortDirection,
};
use crate::model::project::{default_chapter_title, Chapter, ChapterId, ChapterPatch, ProjectId};
use crate::repo::project_store::{ProjectRepository, StoreResult};
use log::{debug, info};

/// Separator placed between existing content and applied generated text.
pub const GENERATED_TEXT_SEPARATOR: &str = "\n\n";

/// In-memory editing state for one project.
pub struct EditorSession<'store, R: ProjectRepository + ?Sized> {
    store: &'store R,
    project_id: ProjectId,
    project_title: String,
    chapters: Vec<Chapter>,
    selected_chapter_id: Option<ChapterId>,
    sort_direction: SortDirection,
}

impl<'store, R: ProjectRepository + ?Sized> EditorSession<'store, R> {
    /// Opens a session on `project_id`.
    ///
    /// Returns `Ok(None)` when the project does not exist. The first chapter
    /// by `order` starts selected.
    pub fn open(store: &'store R, project_id: &ProjectId) -> StoreResult<Option<Self>> {
        let Some(project) = store.get_project(project_id)? else {
            info!("event=editor_open module=editor status=missing project_id={project_id}");
            return Ok(None);
        };

        let selected_chapter_id =
            first_in_order(&project.chapters).map(|chapter| chapter.id.clone());
        info!(
            "event=editor_open module=editor status=ok project_id={project_id} chapter_count={}",
            project.chapters.len()
        );
        Ok(Some(Self {
            store,
            project_id: project.id,
            project_title: project.title,
            chapters: project.chapters,
            selected_chapter_id,
            sort_direction: SortDirection::default(),
        }))
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Project title as of session open.
    pub fn project_title(&self) -> &str {
        &self.project_title
    }

    /// Working copy in storage sequence.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Working copy sorted by `order` in the current display direction.
    pub fn display_chapters(&self) -> Vec<&Chapter> {
        sorted_view(&self.chapters, self.sort_direction)
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn is_ascending(&self) -> bool {
        self.sort_direction.is_ascending()
    }

    pub fn selected_chapter_id(&self) -> Option<&ChapterId> {
        self.selected_chapter_id.as_ref()
    }

    pub fn selected_chapter(&self) -> Option<&Chapter> {
        let id = self.selected_chapter_id.as_ref()?;
        self.chapter(id)
    }

    pub fn chapter(&self, id: &ChapterId) -> Option<&Chapter> {
        self.chapters.iter().find(|chapter| chapter.id == *id)
    }

    /// Appends a new empty chapter, selects it and persists the list.
    pub fn add_chapter(&mut self) -> StoreResult<ChapterId> {
        let chapter = Chapter::new(
            default_chapter_title(self.chapters.len() + 1),
            next_order(&self.chapters),
        );
        let chapter_id = chapter.id.clone();

        let mut updated = self.chapters.clone();
        updated.push(chapter);
        self.commit(updated)?;
        self.selected_chapter_id = Some(chapter_id.clone());

        info!(
            "event=chapter_add module=editor status=ok project_id={} chapter_id={chapter_id}",
            self.project_id
        );
        Ok(chapter_id)
    }

    /// Deletes one chapter after `confirm` approves it.
    ///
    /// Returns `Ok(false)` when the id is unknown or the user declined.
    /// Remaining chapters are renumbered `0..n-1`; a deleted selection falls
    /// to the first remaining chapter by `order`.
    pub fn delete_chapter(
        &mut self,
        id: &ChapterId,
        confirm: impl FnOnce(&Chapter) -> bool,
    ) -> StoreResult<bool> {
        let Some(target) = self.chapter(id) else {
            return Ok(false);
        };
        if !confirm(target) {
            debug!(
                "event=chapter_delete module=editor status=declined project_id={} chapter_id={id}",
                self.project_id
            );
            return Ok(false);
        }

        let mut updated: Vec<Chapter> = self
            .chapters
            .iter()
            .filter(|chapter| chapter.id != *id)
            .cloned()
            .collect();
        renumber(&mut updated);
        self.commit(updated)?;

        if self.selected_chapter_id.as_ref() == Some(id) {
            self.selected_chapter_id =
                first_in_order(&self.chapters).map(|chapter| chapter.id.clone());
        }

        info!(
            "event=chapter_delete module=editor status=ok project_id={} chapter_id={id} remaining={}",
            self.project_id,
            self.chapters.len()
        );
        Ok(true)
    }

    /// Merges `patch` into one chapter and persists the full list.
    ///
    /// Every call is an independent store round-trip; unknown ids are ignored.
    pub fn update_chapter(&mut self, id: &ChapterId, patch: &ChapterPatch) -> StoreResult<()> {
        let Some(index) = self.chapters.iter().position(|chapter| chapter.id == *id) else {
            return Ok(());
        };

        let mut updated = self.chapters.clone();
        updated[index].apply(patch);
        self.commit(updated)?;

        debug!(
            "event=chapter_update module=editor status=ok project_id={} chapter_id={id} title={} content={}",
            self.project_id,
            patch.title.is_some(),
            patch.content.is_some()
        );
        Ok(())
    }

    /// Flips the display direction. Nothing is persisted.
    pub fn toggle_sort_order(&mut self) -> SortDirection {
        self.sort_direction = self.sort_direction.toggled();
        self.sort_direction
    }

    /// Shows another chapter in the detail view.
    ///
    /// Returns `false` and keeps the current selection when `id` is unknown.
    pub fn select_chapter(&mut self, id: &ChapterId) -> bool {
        if self.chapter(id).is_none() {
            return false;
        }
        self.selected_chapter_id = Some(id.clone());
        true
    }

    /// Appends assist output to the selected chapter after a blank line.
    ///
    /// Returns `Ok(false)` when nothing is selected or `text` is empty.
    pub fn apply_generated_text(&mut self, text: &str) -> StoreResult<bool> {
        if text.is_empty() {
            return Ok(false);
        }
        let Some(current) = self.selected_chapter() else {
            return Ok(false);
        };

        let id = current.id.clone();
        let content = format!("{}{GENERATED_TEXT_SEPARATOR}{text}", current.content);
        self.update_chapter(&id, &ChapterPatch::content(content))?;
        Ok(true)
    }

    fn commit(&mut self, updated: Vec<Chapter>) -> StoreResult<()> {
        self.store.replace_chapters(&self.project_id, &updated)?;
        self.chapters = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::EditorSession;
    use crate::config::StoreConfig;
    use crate::model::project::{ChapterPatch, ProjectId};
    use crate::repo::project_store::{ProjectRepository, ProjectStore};
    use crate::storage::MemoryKeyValueStore;

    #[test]
    fn open_returns_none_for_unknown_project() {
        let store = ProjectStore::new(MemoryKeyValueStore::new(), StoreConfig::default());
        let session = EditorSession::open(&store, &ProjectId::generate()).unwrap();
        assert!(session.is_none());
    }

    #[test]
    fn update_of_selected_chapter_is_visible_through_selection() {
        let store = ProjectStore::new(MemoryKeyValueStore::new(), StoreConfig::default());
        let project = store.create_project("p").unwrap();
        let mut session = EditorSession::open(&store, &project.id).unwrap().unwrap();
        let id = session.add_chapter().unwrap();

        session
            .update_chapter(&id, &ChapterPatch::title("序章"))
            .unwrap();
        assert_eq!(session.selected_chapter().unwrap().title, "序章");
    }

    #[test]
    fn apply_generated_text_needs_selection() {
        let store = ProjectStore::new(MemoryKeyValueStore::new(), StoreConfig::default());
        let project = store.create_project("p").unwrap();
        let mut session = EditorSession::open(&store, &project.id).unwrap().unwrap();
        assert!(!session.apply_generated_text("text").unwrap());
    }
}
