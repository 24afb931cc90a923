//! In-memory blackboard backend.
//!
//! Non-persistent implementation of [`Blackboard`] for tests and dry runs.

use crate::models::{Document, Tag, TagId};
use crate::storage::traits::{Blackboard, DocumentIter};
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory blackboard.
///
/// Documents are kept in insertion order; tag identifiers are assigned
/// sequentially starting at 1. Data is not persisted between runs.
///
/// # Example
///
/// ```rust
/// use csvboard::storage::{Blackboard, InMemoryBlackboard};
/// use csvboard::Document;
///
/// let board = InMemoryBlackboard::new();
/// board.insert_document(Document::new().with_field("a", 1.0))?;
/// assert_eq!(board.document_count()?, 1);
/// # Ok::<(), csvboard::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBlackboard {
    tags: RwLock<HashMap<String, TagId>>,
    documents: RwLock<Vec<Document>>,
}

impl InMemoryBlackboard {
    /// Creates an empty blackboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all stored tags, ordered by identifier.
    pub fn tags(&self) -> Result<Vec<Tag>> {
        let tags = self.tags.read().map_err(|_| poisoned("list_tags"))?;
        let mut list: Vec<Tag> = tags
            .iter()
            .map(|(name, id)| Tag {
                id: *id,
                name: name.clone(),
            })
            .collect();
        list.sort_by_key(|tag| tag.id);
        Ok(list)
    }
}

fn poisoned(operation: &str) -> Error {
    Error::operation(operation, "Lock poisoned")
}

impl Blackboard for InMemoryBlackboard {
    fn lookup_tag_id(&self, name: &str) -> Result<Option<TagId>> {
        let tags = self.tags.read().map_err(|_| poisoned("lookup_tag_id"))?;
        Ok(tags.get(name).copied())
    }

    fn create_tag(&self, name: &str) -> Result<TagId> {
        let mut tags = self.tags.write().map_err(|_| poisoned("create_tag"))?;
        if let Some(id) = tags.get(name) {
            return Ok(*id);
        }

        let next = u64::try_from(tags.len())
            .ok()
            .and_then(|len| TagId::new(len + 1))
            .ok_or_else(|| Error::operation("create_tag", "tag identifier space exhausted"))?;
        tags.insert(name.to_string(), next);
        Ok(next)
    }

    fn insert_document(&self, document: Document) -> Result<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| poisoned("insert_document"))?;
        documents.push(document);
        Ok(())
    }

    fn iterate_documents(&self) -> Result<DocumentIter<'_>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| poisoned("iterate_documents"))?;
        let snapshot = documents.clone();
        Ok(Box::new(snapshot.into_iter().map(Ok)))
    }

    fn document_count(&self) -> Result<usize> {
        let documents = self
            .documents
            .read()
            .map_err(|_| poisoned("document_count"))?;
        Ok(documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tag_assigns_sequential_ids() {
        let board = InMemoryBlackboard::new();

        let first = board.create_tag("alpha").unwrap();
        let second = board.create_tag("beta").unwrap();

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
        assert_eq!(board.lookup_tag_id("alpha").unwrap(), Some(first));
        assert_eq!(board.lookup_tag_id("gamma").unwrap(), None);
    }

    #[test]
    fn test_create_existing_tag_returns_same_id() {
        let board = InMemoryBlackboard::new();
        let id = board.create_tag("alpha").unwrap();
        assert_eq!(board.create_tag("alpha").unwrap(), id);
        assert_eq!(board.tags().unwrap().len(), 1);
    }

    #[test]
    fn test_iterates_in_insertion_order() {
        let board = InMemoryBlackboard::new();
        for i in 0..3 {
            board
                .insert_document(Document::new().with_field("i", f64::from(i)))
                .unwrap();
        }

        let values: Vec<f64> = board
            .iterate_documents()
            .unwrap()
            .map(|doc| doc.unwrap().get("i").and_then(|v| v.as_number()).unwrap())
            .collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0]);
        assert_eq!(board.document_count().unwrap(), 3);
    }
}
