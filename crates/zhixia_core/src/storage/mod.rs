//! Key-value persistence port and its backends.
//!
//! # Responsibility
//! - Define the narrow `load`/`save` contract the project store writes through.
//! - Provide in-memory and SQLite implementations.
//!
//! # Invariants
//! - Backends are synchronous: `save` has completed when it returns `Ok`.
//! - `save` replaces the whole value under a key; there are no partial writes.
//! - Backends do no locking; concurrent writers are last-write-wins.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite_kv;

pub use sqlite_kv::SqliteKeyValueStore;

/// Result type for key-value backend operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by key-value backends.
#[derive(Debug)]
pub enum StorageError {
    /// SQLite statement or connection failure.
    Sqlite(rusqlite::Error),
    /// Database file was migrated by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Backend refused or failed the operation for another reason.
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "kv database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "kv store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::Unavailable(message) => write!(f, "kv store unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. }
            | Self::UninitializedConnection { .. }
            | Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Synchronous string key-value medium.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` when absent.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).save(key, value)
    }
}

/// Process-local key-value map.
///
/// Not thread-safe; the workspace runs on one logical thread.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
