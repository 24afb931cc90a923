//! Storage layer abstraction.
//!
//! The import and export paths only talk to the [`Blackboard`] trait. Two
//! backends are provided:
//! - [`InMemoryBlackboard`]: non-persistent, for tests and dry runs
//! - [`SqliteBlackboard`]: one durable `SQLite` file per blackboard name

// Allow significant_drop_tightening - connection guards live for the whole method
#![allow(clippy::significant_drop_tightening)]

mod factory;
mod memory;
pub mod sqlite;
pub mod traits;

pub use factory::{MEMORY_BLACKBOARD, blackboard_path, open_blackboard};
pub use memory::InMemoryBlackboard;
pub use sqlite::SqliteBlackboard;
pub use traits::{Blackboard, DocumentIter};
