//! AI writing assist contract.
//!
//! # Responsibility
//! - Define the two single-shot request/response calls the editor consumes.
//! - Validate requests before any provider work starts.
//!
//! # Invariants
//! - A call yields the complete text or an error; partial output is never exposed.
//! - Calls place no lock on the chapters they reference; the editor may keep
//!   mutating its working copy while a call is pending.

use crate::model::project::{Chapter, ChapterId};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod clipboard;
mod mock;

pub use clipboard::{copy_result, Clipboard};
pub use mock::{AssistConfig, MockAssistProvider};

/// Assist model offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistModel {
    pub id: &'static str,
    pub name: &'static str,
}

/// Models accepted by both assist calls. The first one is the default.
pub const ASSIST_MODELS: &[AssistModel] = &[
    AssistModel {
        id: "gpt-4",
        name: "GPT-4",
    },
    AssistModel {
        id: "gpt-3.5",
        name: "GPT-3.5",
    },
];

/// Id of the model preselected by the assist panels.
pub fn default_model_id() -> &'static str {
    ASSIST_MODELS[0].id
}

/// Looks up a known model by id.
pub fn find_model(id: &str) -> Option<&'static AssistModel> {
    ASSIST_MODELS.iter().find(|model| model.id == id)
}

/// Errors from assist calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistError {
    UnknownModel(String),
    /// Prompt is empty or whitespace-only.
    BlankPrompt,
    /// Provider-side failure.
    Provider(String),
}

impl Display for AssistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownModel(id) => write!(f, "unknown assist model: `{id}`"),
            Self::BlankPrompt => write!(f, "assist prompt must not be blank"),
            Self::Provider(message) => write!(f, "assist provider failed: {message}"),
        }
    }
}

impl Error for AssistError {}

/// Request for continuation text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub model_id: String,
    pub prompt: String,
    /// Chapters the user ticked as context.
    pub referenced_chapter_ids: Vec<ChapterId>,
}

/// Request for an analysis report on one chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub model_id: String,
    pub prompt: String,
    /// Snapshot of the chapter at request time.
    pub chapter: Chapter,
}

/// Asynchronous single-shot assist provider.
#[async_trait::async_trait]
pub trait AssistProvider: Send + Sync {
    /// Produces text to append to the current chapter.
    async fn generate(&self, request: GenerateRequest) -> Result<String, AssistError>;
    /// Produces an analysis report for one chapter.
    async fn analyze(&self, request: AnalyzeRequest) -> Result<String, AssistError>;
}

/// Checks the parts shared by both request kinds.
pub fn validate_request(model_id: &str, prompt: &str) -> Result<(), AssistError> {
    if find_model(model_id).is_none() {
        return Err(AssistError::UnknownModel(model_id.to_string()));
    }
    if prompt.trim().is_empty() {
        return Err(AssistError::BlankPrompt);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{default_model_id, find_model, validate_request, AssistError};

    #[test]
    fn known_models_resolve() {
        assert_eq!(default_model_id(), "gpt-4");
        assert_eq!(find_model("gpt-3.5").map(|m| m.name), Some("GPT-3.5"));
        assert!(find_model("claude").is_none());
    }

    #[test]
    fn validation_checks_model_then_prompt() {
        assert_eq!(
            validate_request("nope", ""),
            Err(AssistError::UnknownModel("nope".to_string()))
        );
        assert_eq!(validate_request("gpt-4", "  "), Err(AssistError::BlankPrompt));
        assert!(validate_request("gpt-4", "继续").is_ok());
    }
}
