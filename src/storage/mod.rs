//! Storage module for persisting executive order records
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and idempotent schema creation
//! - Deduplicated record insertion with store-assigned ids
//! - Lookup by id, title, and url
//! - Substring search across all record fields

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{RecordStore, StorageError, StorageResult};

use crate::ArchiveError;
use std::path::Path;

/// Initializes or opens a record store at the given database path
///
/// The parent directory is created if it does not exist.
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStore)` - Successfully initialized storage
/// * `Err(ArchiveError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> Result<SqliteStore, ArchiveError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(SqliteStore::open(path)?)
}

/// A record as drafted by the extractor, before the store assigns an id
///
/// Fields may carry the `"N/A"` sentinel when extraction failed; `url` is
/// always the real source URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRecord {
    pub title: String,
    pub date: String,
    pub content: String,
    pub url: String,
}

impl DraftRecord {
    /// The placeholder draft recorded when extraction of a document fails
    pub fn sentinel(url: String) -> Self {
        Self {
            title: "N/A".to_string(),
            date: "N/A".to_string(),
            content: "N/A".to_string(),
            url,
        }
    }

    /// True when this draft marks a failed extraction
    pub fn is_sentinel(&self) -> bool {
        self.title == "N/A" && self.date == "N/A" && self.content == "N/A"
    }
}

/// A durable record with its store-assigned id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub content: String,
    pub url: String,
}

/// Short form of a record, as shown in listings and search results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub id: i64,
    pub title: String,
    pub date: String,
}

/// Outcome of a deduplicated insertion attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The draft was new; committed under this id
    Inserted(i64),
    /// A record with the same url (or title) already exists; nothing written
    SkippedDuplicate,
}
