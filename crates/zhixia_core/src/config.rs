//! Store configuration and date source.
//!
//! # Responsibility
//! - Carry the namespace key under which the project list is persisted.
//! - Provide the injectable clock used for `last_modified` stamps.
//!
//! # Invariants
//! - Dates are UTC calendar dates formatted `YYYY-MM-DD`.

use chrono::{NaiveDate, Utc};

/// Default key holding the serialized project list.
pub const DEFAULT_NAMESPACE_KEY: &str = "zhixia_projects";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Configuration for `ProjectStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key-value key holding the whole project collection.
    pub namespace_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            namespace_key: DEFAULT_NAMESPACE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn with_namespace_key(namespace_key: impl Into<String>) -> Self {
        Self {
            namespace_key: namespace_key.into(),
        }
    }
}

/// Source of "today" for modification stamps.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock date in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Formats a date the way it is stored in `Project::last_modified`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
