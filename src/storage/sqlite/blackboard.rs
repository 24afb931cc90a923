//! `SQLite`-based blackboard backend.
//!
//! Provides a durable blackboard stored in a single database file. Documents
//! are returned in insertion order, read lazily in pages.

use super::document_row::{build_document_from_row, encode_document, fetch_document_page};
use super::{acquire_lock, configure_connection};
use crate::models::{Document, TagId};
use crate::storage::traits::{Blackboard, DocumentIter};
use crate::{Error, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::instrument;

/// Number of documents fetched per page while iterating.
const PAGE_SIZE: usize = 256;

/// `SQLite`-based blackboard.
///
/// # Schema
///
/// - `tags(id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT UNIQUE)`;
///   identifiers start at 1 and are never reused
/// - `documents(seq INTEGER PRIMARY KEY AUTOINCREMENT, fields TEXT, tags TEXT)`
pub struct SqliteBlackboard {
    /// Connection to the `SQLite` database.
    ///
    /// Protected by Mutex because `rusqlite::Connection` is not `Sync`.
    conn: Mutex<Connection>,
    /// Path to the database (None for in-memory).
    db_path: Option<PathBuf>,
}

impl SqliteBlackboard {
    /// Opens (or creates) a blackboard database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let conn = Connection::open(&db_path).map_err(|e| Error::operation("open_sqlite", e))?;

        let backend = Self {
            conn: Mutex::new(conn),
            db_path: Some(db_path),
        };

        backend.initialize()?;
        Ok(backend)
    }

    /// Creates an in-memory blackboard (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::operation("open_sqlite_in_memory", e))?;

        let backend = Self {
            conn: Mutex::new(conn),
            db_path: None,
        };

        backend.initialize()?;
        Ok(backend)
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn initialize(&self) -> Result<()> {
        let conn = acquire_lock(&self.conn);
        configure_connection(&conn)?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tags (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );
            CREATE TABLE IF NOT EXISTS documents (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                fields TEXT NOT NULL,
                tags TEXT NOT NULL
            );",
        )
        .map_err(|e| Error::operation("create_blackboard_tables", e))?;

        Ok(())
    }

    fn fetch_page(&self, after_seq: i64) -> Result<Vec<(i64, Document)>> {
        let conn = acquire_lock(&self.conn);
        fetch_document_page(&conn, after_seq, PAGE_SIZE)?
            .iter()
            .map(|row| -> Result<(i64, Document)> { Ok((row.seq, build_document_from_row(row)?)) })
            .collect()
    }
}

fn tag_id_from_row(raw: i64) -> Result<TagId> {
    u64::try_from(raw)
        .ok()
        .and_then(TagId::new)
        .ok_or_else(|| Error::operation("read_tag_id", format!("invalid tag identifier {raw}")))
}

impl Blackboard for SqliteBlackboard {
    fn lookup_tag_id(&self, name: &str) -> Result<Option<TagId>> {
        let conn = acquire_lock(&self.conn);
        let raw: Option<i64> = conn
            .query_row("SELECT id FROM tags WHERE name = ?1", params![name], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| Error::operation("lookup_tag_id", e))?;

        raw.map(tag_id_from_row).transpose()
    }

    #[instrument(skip(self), fields(backend = "sqlite"))]
    fn create_tag(&self, name: &str) -> Result<TagId> {
        let conn = acquire_lock(&self.conn);

        // An ignored insert still consumes an AUTOINCREMENT value, so an
        // existing name is answered before inserting.
        let existing: Option<i64> = conn
            .query_row("SELECT id FROM tags WHERE name = ?1", params![name], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| Error::operation("create_tag", e))?;
        if let Some(raw) = existing {
            return tag_id_from_row(raw);
        }

        conn.execute("INSERT INTO tags (name) VALUES (?1)", params![name])
            .map_err(|e| Error::operation("create_tag", e))?;
        tag_id_from_row(conn.last_insert_rowid())
    }

    fn insert_document(&self, document: Document) -> Result<()> {
        let (fields, tags) = encode_document(&document)?;
        let conn = acquire_lock(&self.conn);
        conn.execute(
            "INSERT INTO documents (fields, tags) VALUES (?1, ?2)",
            params![fields, tags],
        )
        .map_err(|e| Error::operation("insert_document", e))?;
        Ok(())
    }

    fn iterate_documents(&self) -> Result<DocumentIter<'_>> {
        Ok(Box::new(DocumentCursor {
            backend: self,
            after_seq: 0,
            buffer: VecDeque::new(),
            exhausted: false,
        }))
    }

    fn document_count(&self) -> Result<usize> {
        let conn = acquire_lock(&self.conn);
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
            .map_err(|e| Error::operation("count_documents", e))?;
        usize::try_from(count).map_err(|e| Error::operation("count_documents", e))
    }
}

/// Page-by-page cursor over the `documents` table.
///
/// The connection lock is only held while a page is fetched, never across
/// calls to `next`.
struct DocumentCursor<'a> {
    backend: &'a SqliteBlackboard,
    after_seq: i64,
    buffer: VecDeque<Document>,
    exhausted: bool,
}

impl Iterator for DocumentCursor<'_> {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() && !self.exhausted {
            match self.backend.fetch_page(self.after_seq) {
                Ok(page) => {
                    self.exhausted = page.len() < PAGE_SIZE;
                    if let Some((seq, _)) = page.last() {
                        self.after_seq = *seq;
                    }
                    self.buffer.extend(page.into_iter().map(|(_, doc)| doc));
                },
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(e));
                },
            }
        }
        self.buffer.pop_front().map(Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldValue;

    #[test]
    fn test_tags_are_created_once() {
        let board = SqliteBlackboard::in_memory().unwrap();

        assert_eq!(board.lookup_tag_id("sensor").unwrap(), None);
        let id = board.create_tag("sensor").unwrap();
        assert_eq!(id.get(), 1);
        assert_eq!(board.lookup_tag_id("sensor").unwrap(), Some(id));
        assert_eq!(board.create_tag("sensor").unwrap(), id);
        assert_eq!(board.create_tag("other").unwrap().get(), 2);
    }

    #[test]
    fn test_repeated_create_keeps_ids_dense() {
        let board = SqliteBlackboard::in_memory().unwrap();
        for _ in 0..3 {
            assert_eq!(board.create_tag("same").unwrap().get(), 1);
        }
        assert_eq!(board.create_tag("next").unwrap().get(), 2);
    }

    #[test]
    fn test_non_finite_numbers_round_trip() {
        let board = SqliteBlackboard::in_memory().unwrap();
        board
            .insert_document(
                Document::new()
                    .with_field("inf", f64::INFINITY)
                    .with_field("nan", f64::NAN),
            )
            .unwrap();

        let docs: Vec<Document> = board
            .iterate_documents()
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(docs[0].get("inf"), Some(&FieldValue::Number(f64::INFINITY)));
        assert!(
            docs[0]
                .get("nan")
                .and_then(FieldValue::as_number)
                .is_some_and(f64::is_nan)
        );
    }

    #[test]
    fn test_iteration_crosses_page_boundaries() {
        let board = SqliteBlackboard::in_memory().unwrap();
        let total = PAGE_SIZE * 2 + 3;
        for i in 0..total {
            let n = f64::from(u32::try_from(i).unwrap());
            board
                .insert_document(Document::new().with_field("i", n))
                .unwrap();
        }

        let docs: Vec<Document> = board
            .iterate_documents()
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(docs.len(), total);
        assert_eq!(docs[0].get("i"), Some(&FieldValue::Number(0.0)));
        assert_eq!(
            docs[total - 1].get("i").and_then(FieldValue::as_number),
            Some(f64::from(u32::try_from(total - 1).unwrap()))
        );
        assert_eq!(board.document_count().unwrap(), total);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("board.sqlite");

        {
            let board = SqliteBlackboard::new(&path).unwrap();
            let tag = board.create_tag("t").unwrap();
            board
                .insert_document(Document::new().with_field("k", "v").with_tags(vec![tag]))
                .unwrap();
        }

        let board = SqliteBlackboard::new(&path).unwrap();
        assert_eq!(board.db_path(), Some(path.as_path()));
        let docs: Vec<Document> = board
            .iterate_documents()
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].get("k"), Some(&FieldValue::Text("v".to_string())));
        assert_eq!(docs[0].tags().len(), 1);
    }
}
