//! Session services driven by the UI.
//!
//! # Responsibility
//! - Keep UI-held working copies consistent with the project store.
//! - Keep view concerns (selection, sort direction) out of persistence.

pub mod editor_session;
pub mod project_list;
