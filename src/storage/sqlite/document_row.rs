//! Row conversion utilities for `SQLite` document storage.
//!
//! Documents are stored as one row each: an autoincrement sequence number that
//! fixes iteration order, the field list encoded as JSON and the tag identifier
//! list encoded as a JSON array.

use crate::models::{Document, Field, TagId};
use crate::{Error, Result};
use rusqlite::{Connection, params};

/// Raw document row as stored in the `documents` table.
#[derive(Debug)]
pub struct DocumentRow {
    /// Insertion sequence number.
    pub seq: i64,
    /// JSON-encoded field list.
    pub fields: String,
    /// JSON-encoded tag identifier list.
    pub tags: String,
}

/// Encodes a document into its stored JSON columns.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if serialization fails.
pub fn encode_document(document: &Document) -> Result<(String, String)> {
    let fields = serde_json::to_string(document.fields())
        .map_err(|e| Error::operation("encode_document_fields", e))?;
    let tags = serde_json::to_string(document.tags())
        .map_err(|e| Error::operation("encode_document_tags", e))?;
    Ok((fields, tags))
}

/// Decodes a stored row back into a [`Document`].
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if either JSON column is malformed.
pub fn build_document_from_row(row: &DocumentRow) -> Result<Document> {
    let fields: Vec<Field> = serde_json::from_str(&row.fields).map_err(|e| {
        Error::operation("decode_document_fields", format!("row {}: {e}", row.seq))
    })?;
    let tags: Vec<TagId> = serde_json::from_str(&row.tags).map_err(|e| {
        Error::operation("decode_document_tags", format!("row {}: {e}", row.seq))
    })?;

    let document = fields
        .into_iter()
        .fold(Document::new(), |doc, field| {
            doc.with_field(field.name, field.value)
        })
        .with_tags(tags);
    Ok(document)
}

/// Fetches up to `limit` rows with a sequence number greater than `after_seq`.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if the query fails.
pub fn fetch_document_page(
    conn: &Connection,
    after_seq: i64,
    limit: usize,
) -> Result<Vec<DocumentRow>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let mut stmt = conn
        .prepare_cached(
            "SELECT seq, fields, tags FROM documents WHERE seq > ?1 ORDER BY seq LIMIT ?2",
        )
        .map_err(|e| Error::operation("prepare_fetch_documents", e))?;

    let rows = stmt
        .query_map(params![after_seq, limit], |row| {
            Ok(DocumentRow {
                seq: row.get(0)?,
                fields: row.get(1)?,
                tags: row.get(2)?,
            })
        })
        .map_err(|e| Error::operation("fetch_documents", e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::operation("read_document_row", e))?;

    Ok(rows)
}
