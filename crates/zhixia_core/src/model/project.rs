//! Project and chapter records.
//!
//! # Responsibility
//! - Define the canonical records persisted under the store namespace key.
//! - Provide constructors matching the creation lifecycle of each record.
//!
//! # Invariants
//! - `id` fields never change after construction.
//! - New projects start with no chapters and `word_count == 0`.
//! - New chapters start with empty content.
//!
//! # Compatibility
//! Field names serialize in camelCase (`lastModified`, `wordCount`) so that
//! payloads written by the browser build load unchanged. Ids are opaque
//! strings: new ones are UUID v4 text, stored ones are never reinterpreted.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Returns a fresh random id.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(
    /// Stable project identifier.
    ProjectId
);

string_id!(
    /// Stable chapter identifier, unique within its owning project.
    ChapterId
);

/// Validation errors for user-provided project fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    /// Title is empty or whitespace-only.
    BlankTitle,
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "project title must not be blank"),
        }
    }
}

impl Error for ProjectValidationError {}

/// One writing project with its ordered chapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    /// User-facing display title.
    pub title: String,
    /// UTC date of the last store-level mutation, formatted `YYYY-MM-DD`.
    pub last_modified: String,
    /// Sum of chapter content lengths in characters. Non-authoritative.
    pub word_count: u64,
    /// Owned chapters. Presentation order is given by `Chapter::order`.
    pub chapters: Vec<Chapter>,
}

impl Project {
    /// Creates an empty project dated `today`.
    pub fn new(title: impl Into<String>, today: impl Into<String>) -> Self {
        Self {
            id: ProjectId::generate(),
            title: title.into(),
            last_modified: today.into(),
            word_count: 0,
            chapters: Vec::new(),
        }
    }

    /// Replaces the chapter list and recomputes the derived fields.
    pub fn set_chapters(&mut self, chapters: Vec<Chapter>, today: impl Into<String>) {
        self.word_count = total_content_length(&chapters);
        self.chapters = chapters;
        self.last_modified = today.into();
    }

    /// Updates the display title and touches `last_modified`.
    pub fn rename(&mut self, title: impl Into<String>, today: impl Into<String>) {
        self.title = title.into();
        self.last_modified = today.into();
    }
}

/// One ordered unit of prose within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    pub title: String,
    pub content: String,
    /// Zero-based presentation position.
    pub order: u32,
}

impl Chapter {
    /// Creates an empty chapter at the given position.
    pub fn new(title: impl Into<String>, order: u32) -> Self {
        Self {
            id: ChapterId::generate(),
            title: title.into(),
            content: String::new(),
            order,
        }
    }

    /// Merges the fields present in `patch` into this chapter.
    pub fn apply(&mut self, patch: &ChapterPatch) {
        if let Some(title) = patch.title.as_ref() {
            self.title.clone_from(title);
        }
        if let Some(content) = patch.content.as_ref() {
            self.content.clone_from(content);
        }
    }

    /// Content length in characters, as counted towards `Project::word_count`.
    pub fn content_length(&self) -> u64 {
        self.content.chars().count() as u64
    }
}

/// Partial chapter update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl ChapterPatch {
    /// Patch replacing only the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    /// Patch replacing only the content.
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Default title for the `n`-th chapter (1-based), e.g. `第3章`.
///
/// Assigned once at creation from the chapter count; later deletions do not
/// renumber it.
pub fn default_chapter_title(n: usize) -> String {
    format!("第{n}章")
}

/// Sum of chapter content lengths in characters.
pub fn total_content_length(chapters: &[Chapter]) -> u64 {
    chapters.iter().map(Chapter::content_length).sum()
}

/// Rejects empty or whitespace-only titles.
pub fn validate_title(title: &str) -> Result<(), ProjectValidationError> {
    if title.trim().is_empty() {
        return Err(ProjectValidationError::BlankTitle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        default_chapter_title, total_content_length, validate_title, Chapter, ChapterId,
        ChapterPatch, Project, ProjectId, ProjectValidationError,
    };

    #[test]
    fn new_project_starts_empty() {
        let project = Project::new("My Novel", "2024-05-01");
        assert_eq!(project.word_count, 0);
        assert!(project.chapters.is_empty());
        assert_eq!(project.last_modified, "2024-05-01");
    }

    #[test]
    fn set_chapters_counts_characters_not_bytes() {
        let mut project = Project::new("p", "2024-05-01");
        let mut first = Chapter::new("a", 0);
        first.content = "月光如水".to_string();
        let mut second = Chapter::new("b", 1);
        second.content = "abc".to_string();

        project.set_chapters(vec![first, second], "2024-05-02");
        assert_eq!(project.word_count, 7);
        assert_eq!(project.last_modified, "2024-05-02");
        assert_eq!(total_content_length(&project.chapters), 7);
    }

    #[test]
    fn apply_patch_merges_only_present_fields() {
        let mut chapter = Chapter::new("old", 0);
        chapter.content = "body".to_string();

        chapter.apply(&ChapterPatch::title("new"));
        assert_eq!(chapter.title, "new");
        assert_eq!(chapter.content, "body");

        chapter.apply(&ChapterPatch::content(""));
        assert_eq!(chapter.title, "new");
        assert!(chapter.content.is_empty());
        assert!(ChapterPatch::default().is_empty());
    }

    #[test]
    fn default_title_uses_chapter_number() {
        assert_eq!(default_chapter_title(3), "第3章");
    }

    #[test]
    fn validate_title_rejects_whitespace() {
        assert_eq!(
            validate_title("  \t"),
            Err(ProjectValidationError::BlankTitle)
        );
        assert!(validate_title(" x ").is_ok());
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let project = Project::new("p", "2024-05-01");
        let json = serde_json::to_value(&project).unwrap();
        assert!(json.get("lastModified").is_some());
        assert!(json.get("wordCount").is_some());
        assert!(json.get("last_modified").is_none());
    }

    #[test]
    fn ids_round_trip_as_plain_strings() {
        let id = ProjectId::from("1700000000000");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""1700000000000""#);
        let parsed: ChapterId = serde_json::from_str(r#""c1""#).unwrap();
        assert_eq!(parsed.as_str(), "c1");
        assert_ne!(ProjectId::generate(), ProjectId::generate());
    }
}
