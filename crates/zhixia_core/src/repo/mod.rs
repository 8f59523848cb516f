//! Project store: durable CRUD over the whole project collection.
//!
//! # Responsibility
//! - Define the `ProjectRepository` contract consumed by sessions.
//! - Persist the collection as one JSON payload through a `KeyValueStore`.
//!
//! # Invariants
//! - Every mutation is one full read-modify-write of the payload.
//! - Operations on unknown ids are no-ops, not errors.

pub mod project_store;
