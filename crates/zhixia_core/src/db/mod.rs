//! SQLite bootstrap for the key-value persistence backend.
//!
//! # Responsibility
//! - Open and configure SQLite connections backing `SqliteKeyValueStore`.
//! - Apply table-layout migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - The version covers the table layout only; the stored project payload
//!   carries no version of its own.
//! - Failures surface as `StorageError`, the same error the backend reports.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
