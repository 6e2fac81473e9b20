//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the RecordStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{RecordStore, StorageResult};
use crate::storage::{DraftRecord, Record, RecordSummary, StoreOutcome};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::path::Path;

/// SQLite record store backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens or creates a store at the given database file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened/created database
    /// * `Err(rusqlite::Error)` - Failed to open database
    pub fn open(path: &Path) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        Self::configure(&conn)?;
        Ok(Self { conn })
    }

    /// Creates an in-memory store, used by tests
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        Self::configure(&conn)?;
        Ok(Self { conn })
    }

    fn configure(conn: &Connection) -> Result<(), rusqlite::Error> {
        // case_sensitive_like so substring search does not fold case
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
            PRAGMA case_sensitive_like = ON;
        ",
        )?;
        initialize_schema(conn)
    }
}

fn map_record(row: &Row<'_>) -> Result<Record, rusqlite::Error> {
    Ok(Record {
        id: row.get(0)?,
        title: row.get(1)?,
        date: row.get(2)?,
        content: row.get(3)?,
        url: row.get(4)?,
    })
}

fn map_summary(row: &Row<'_>) -> Result<RecordSummary, rusqlite::Error> {
    Ok(RecordSummary {
        id: row.get(0)?,
        title: row.get(1)?,
        date: row.get(2)?,
    })
}

impl RecordStore for SqliteStore {
    fn store_if_absent(&mut self, draft: &DraftRecord) -> StorageResult<StoreOutcome> {
        // Immediate transaction: the duplicate check and the insert must not
        // interleave with another writer's check on the same url.
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let duplicate: Option<i64> = tx
            .query_row(
                "SELECT id FROM executive_orders WHERE url = ?1 OR title = ?2 LIMIT 1",
                params![draft.url, draft.title],
                |row| row.get(0),
            )
            .optional()?;

        if duplicate.is_some() {
            return Ok(StoreOutcome::SkippedDuplicate);
        }

        let max_id: Option<i64> =
            tx.query_row("SELECT MAX(id) FROM executive_orders", [], |row| row.get(0))?;
        let id = max_id.unwrap_or(0) + 1;

        tx.execute(
            "INSERT INTO executive_orders (id, title, date, content, url) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, draft.title, draft.date, draft.content, draft.url],
        )?;

        tx.commit()?;
        Ok(StoreOutcome::Inserted(id))
    }

    fn find_by_id(&self, id: i64) -> StorageResult<Option<Record>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, title, date, content, url FROM executive_orders WHERE id = ?1",
                params![id],
                map_record,
            )
            .optional()?;
        Ok(record)
    }

    fn find_by_title(&self, title: &str) -> StorageResult<Option<Record>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, title, date, content, url FROM executive_orders WHERE title = ?1",
                params![title],
                map_record,
            )
            .optional()?;
        Ok(record)
    }

    fn find_by_url(&self, url: &str) -> StorageResult<Option<Record>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, title, date, content, url FROM executive_orders WHERE url = ?1",
                params![url],
                map_record,
            )
            .optional()?;
        Ok(record)
    }

    fn exists(&self, url: &str) -> StorageResult<bool> {
        Ok(self.find_by_url(url)?.is_some())
    }

    fn search(&self, substring: &str) -> StorageResult<Vec<RecordSummary>> {
        let pattern = format!("%{}%", substring);
        let mut stmt = self.conn.prepare(
            "SELECT id, title, date FROM executive_orders
             WHERE id LIKE ?1 OR title LIKE ?1 OR date LIKE ?1 OR content LIKE ?1 OR url LIKE ?1
             ORDER BY id",
        )?;

        let summaries = stmt
            .query_map(params![pattern], map_summary)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(summaries)
    }

    fn all(&self) -> StorageResult<Vec<RecordSummary>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, date FROM executive_orders ORDER BY id")?;

        let summaries = stmt
            .query_map([], map_summary)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(summaries)
    }

    fn count(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM executive_orders", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(n: u32) -> DraftRecord {
        DraftRecord {
            title: format!("Executive Order {}", n),
            date: "2025-01-20".to_string(),
            content: format!("Body of order {}", n),
            url: format!("https://www.whitehouse.gov/presidential-actions/eo-{}/", n),
        }
    }

    #[test]
    fn test_create_in_memory() {
        assert!(SqliteStore::open_in_memory().is_ok());
    }

    #[test]
    fn test_store_then_find_by_url() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let d = draft(1);

        let outcome = store.store_if_absent(&d).unwrap();
        assert_eq!(outcome, StoreOutcome::Inserted(1));

        let found = store.find_by_url(&d.url).unwrap().unwrap();
        assert_eq!(found.id, 1);
        assert_eq!(found.title, d.title);
        assert_eq!(found.date, d.date);
        assert_eq!(found.content, d.content);
        assert_eq!(found.url, d.url);
    }

    #[test]
    fn test_duplicate_url_skipped() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let d = draft(1);

        store.store_if_absent(&d).unwrap();

        let mut retitled = d.clone();
        retitled.title = "A different title".to_string();
        let outcome = store.store_if_absent(&retitled).unwrap();

        assert_eq!(outcome, StoreOutcome::SkippedDuplicate);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_title_skipped() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let d = draft(1);

        store.store_if_absent(&d).unwrap();

        let mut relinked = d.clone();
        relinked.url = "https://www.whitehouse.gov/presidential-actions/other/".to_string();
        let outcome = store.store_if_absent(&relinked).unwrap();

        assert_eq!(outcome, StoreOutcome::SkippedDuplicate);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_ids_strictly_increasing() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        for n in 1..=5 {
            let outcome = store.store_if_absent(&draft(n)).unwrap();
            assert_eq!(outcome, StoreOutcome::Inserted(n as i64));
        }

        let all = store.all().unwrap();
        let ids: Vec<i64> = all.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_find_by_id_and_title() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let d = draft(7);
        store.store_if_absent(&d).unwrap();

        assert_eq!(store.find_by_id(1).unwrap().unwrap().url, d.url);
        assert_eq!(store.find_by_title(&d.title).unwrap().unwrap().id, 1);
        assert!(store.find_by_id(99).unwrap().is_none());
        assert!(store.find_by_title("missing").unwrap().is_none());
    }

    #[test]
    fn test_exists() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let d = draft(1);

        assert!(!store.exists(&d.url).unwrap());
        store.store_if_absent(&d).unwrap();
        assert!(store.exists(&d.url).unwrap());
    }

    #[test]
    fn test_search_matches_every_field() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .store_if_absent(&DraftRecord {
                title: "Securing the Border".to_string(),
                date: "2025-01-20".to_string(),
                content: "By the authority vested in me...".to_string(),
                url: "https://www.whitehouse.gov/presidential-actions/securing-the-border/"
                    .to_string(),
            })
            .unwrap();
        store
            .store_if_absent(&DraftRecord {
                title: "Unrelated Order".to_string(),
                date: "2024-06-01".to_string(),
                content: "Nothing relevant here".to_string(),
                url: "https://www.whitehouse.gov/presidential-actions/unrelated/".to_string(),
            })
            .unwrap();

        // Matches date of the first record only
        let hits = store.search("2025").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Securing the Border");

        // Matches content
        let hits = store.search("authority vested").unwrap();
        assert_eq!(hits.len(), 1);

        // Matches url
        let hits = store.search("securing-the-border").unwrap();
        assert_eq!(hits.len(), 1);

        // Matches id
        let hits = store.search("2").unwrap();
        assert!(hits.iter().any(|s| s.id == 2));
    }

    #[test]
    fn test_search_is_case_sensitive() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.store_if_absent(&draft(1)).unwrap();

        assert_eq!(store.search("Executive").unwrap().len(), 1);
        assert_eq!(store.search("executive").unwrap().len(), 0);
    }

    #[test]
    fn test_all_lists_summaries_in_id_order() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.store_if_absent(&draft(2)).unwrap();
        store.store_if_absent(&draft(1)).unwrap();

        let all = store.all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, 1);
        assert_eq!(all[1].id, 2);
    }
}
