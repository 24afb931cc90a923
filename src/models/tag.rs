//! Tag identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;

/// Identifier of a tag assigned by a blackboard.
///
/// Identifiers are always positive. "Not yet assigned" is expressed as
/// `Option<TagId>::None`, so a zero identifier can never be attached to a
/// document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(NonZeroU64);

impl TagId {
    /// Creates a tag identifier, returning `None` for zero.
    #[must_use]
    pub const fn new(raw: u64) -> Option<Self> {
        match NonZeroU64::new(raw) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NonZeroU64> for TagId {
    fn from(id: NonZeroU64) -> Self {
        Self(id)
    }
}

/// A named tag together with its assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Assigned identifier.
    pub id: TagId,
    /// Human-readable name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_not_an_identifier() {
        assert!(TagId::new(0).is_none());
        assert_eq!(TagId::new(7).map(TagId::get), Some(7));
    }

    #[test]
    fn test_tag_id_serializes_as_plain_number() {
        let ids = vec![TagId::new(3), TagId::new(1)];
        let json = serde_json::to_string(&ids).unwrap_or_default();
        assert_eq!(json, "[3,1]");

        let parsed: Vec<TagId> = serde_json::from_str("[3,1]").unwrap_or_default();
        assert_eq!(parsed.iter().map(|id| id.get()).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn test_zero_is_rejected_on_deserialize() {
        let parsed: Result<Vec<TagId>, _> = serde_json::from_str("[0]");
        assert!(parsed.is_err());
    }
}
