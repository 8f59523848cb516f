//! Writing workspace domain model.
//!
//! # Responsibility
//! - Define the persisted `Project`/`Chapter` records and their lifecycle helpers.
//! - Own chapter ordering rules shared by the store and editor sessions.
//!
//! # Invariants
//! - Every project and chapter is identified by a stable opaque string id.
//! - Chapter `order` values are dense and zero-based after any deletion.
//! - `word_count` is a derived cache, recomputed by the store on each write.

pub mod chapter_order;
pub mod project;
