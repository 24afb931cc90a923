//! Tag name resolution.

use crate::Result;
use crate::models::TagId;
use crate::storage::Blackboard;

/// Splits a comma-separated tag option into names.
///
/// Whitespace around names is trimmed and empty entries are dropped, so an
/// empty option yields no tags.
#[must_use]
pub fn parse_tag_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Resolves tag names to blackboard identifiers, creating missing tags.
pub struct TagResolver<'a> {
    store: &'a dyn Blackboard,
}

impl<'a> TagResolver<'a> {
    /// Creates a resolver over the given blackboard.
    #[must_use]
    pub const fn new(store: &'a dyn Blackboard) -> Self {
        Self { store }
    }

    /// Resolves every name, in order.
    ///
    /// Duplicate names yield duplicate identifiers. Lookup and creation
    /// failures are returned as-is.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<TagId>> {
        names
            .iter()
            .map(|name| self.resolve_one(name.as_ref()))
            .collect()
    }

    fn resolve_one(&self, name: &str) -> Result<TagId> {
        if let Some(id) = self.store.lookup_tag_id(name)? {
            return Ok(id);
        }
        let id = self.store.create_tag(name)?;
        tracing::debug!(tag = name, id = id.get(), "Created tag");
        Ok(id)
    }
}
