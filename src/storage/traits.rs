//! Storage trait and error types
//!
//! This module defines the trait interface for record stores and the
//! associated error type.

use crate::storage::{DraftRecord, Record, RecordSummary, StoreOutcome};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for record store implementations
///
/// A record's `url` is its business key: `store_if_absent` must never commit
/// two records with the same url, even when callers race. The duplicate
/// check and the insert are observably atomic with respect to the store's
/// own operations.
pub trait RecordStore {
    /// Inserts a draft unless a record with the same url or title exists
    ///
    /// The id is assigned at commit time as `1 + max(existing ids)`, or `1`
    /// for an empty store. Ids are never reused.
    ///
    /// # Returns
    ///
    /// * `StoreOutcome::Inserted(id)` - The draft was committed
    /// * `StoreOutcome::SkippedDuplicate` - Nothing was written
    fn store_if_absent(&mut self, draft: &DraftRecord) -> StorageResult<StoreOutcome>;

    /// Gets a record by its store-assigned id
    fn find_by_id(&self, id: i64) -> StorageResult<Option<Record>>;

    /// Gets a record by exact title
    fn find_by_title(&self, title: &str) -> StorageResult<Option<Record>>;

    /// Gets a record by exact url
    fn find_by_url(&self, url: &str) -> StorageResult<Option<Record>>;

    /// Checks whether a record with this url exists
    fn exists(&self, url: &str) -> StorageResult<bool>;

    /// Finds records whose id, title, date, content, or url contains the
    /// given substring (case-sensitive)
    fn search(&self, substring: &str) -> StorageResult<Vec<RecordSummary>>;

    /// Lists all records as summaries, in id order
    fn all(&self) -> StorageResult<Vec<RecordSummary>>;

    /// Counts stored records
    fn count(&self) -> StorageResult<u64>;
}
