//! Blackboard trait.

use crate::Result;
use crate::models::{Document, TagId};

/// Lazy sequence of stored documents.
pub type DocumentIter<'a> = Box<dyn Iterator<Item = Result<Document>> + 'a>;

/// Trait for tag-annotated document stores.
///
/// This is the only surface the import and export paths depend on. Every
/// error returned from these methods is fatal to the current run.
///
/// Methods take `&self`; backends use interior mutability and are expected to
/// be driven by one writer at a time.
pub trait Blackboard: Send + Sync {
    /// Looks up the identifier of a tag by name.
    fn lookup_tag_id(&self, name: &str) -> Result<Option<TagId>>;

    /// Creates a tag and returns its newly assigned identifier.
    ///
    /// Callers only invoke this after [`Blackboard::lookup_tag_id`] returned
    /// `None`; backends may return the existing identifier if the name is
    /// already present.
    fn create_tag(&self, name: &str) -> Result<TagId>;

    /// Inserts a document. The store owns it from here on.
    fn insert_document(&self, document: Document) -> Result<()>;

    /// Iterates all documents in store-defined order.
    fn iterate_documents(&self) -> Result<DocumentIter<'_>>;

    /// Returns the number of stored documents.
    fn document_count(&self) -> Result<usize> {
        let mut count = 0;
        for document in self.iterate_documents()? {
            document?;
            count += 1;
        }
        Ok(count)
    }
}
