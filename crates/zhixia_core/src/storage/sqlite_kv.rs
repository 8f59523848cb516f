//! SQLite-backed key-value store.
//!
//! # Invariants
//! - Requires a connection migrated to the latest schema version.
//! - `save` is a single upsert statement; the row is replaced atomically.

use super::{KeyValueStore, StorageError, StorageResult};
use crate::db::migrations::{latest_version, schema_version};
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store over the `kv_store` table.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a connection opened via `db::open_db` / `db::open_db_in_memory`.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let actual_version = schema_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StorageError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
