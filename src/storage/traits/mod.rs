//! Storage backend traits.

mod blackboard;

pub use blackboard::{Blackboard, DocumentIter};
