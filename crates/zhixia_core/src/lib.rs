//! Core domain logic for the Zhixia writing workspace.
//! This crate is the single source of truth for project/chapter invariants.

pub mod assist;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use assist::{
    copy_result, default_model_id, find_model, AnalyzeRequest, AssistConfig, AssistError,
    AssistModel, AssistProvider, Clipboard, GenerateRequest, MockAssistProvider, ASSIST_MODELS,
};
pub use config::{Clock, FixedClock, StoreConfig, SystemClock, DEFAULT_NAMESPACE_KEY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::chapter_order::SortDirection;
pub use model::project::{
    default_chapter_title, Chapter, ChapterId, ChapterPatch, Project, ProjectId,
    ProjectValidationError,
};
pub use repo::project_store::{ProjectRepository, ProjectStore, StoreError, StoreResult};
pub use service::editor_session::EditorSession;
pub use service::project_list::ProjectListSession;
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
