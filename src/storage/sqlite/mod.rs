//! `SQLite` blackboard backend.
//!
//! - [`connection`]: lock acquisition with poison recovery, pragma setup
//! - [`document_row`]: JSON encoding of document rows and paged fetches
//! - [`blackboard`]: the [`SqliteBlackboard`] implementation

mod blackboard;
mod connection;
mod document_row;

pub use blackboard::SqliteBlackboard;
pub use connection::{acquire_lock, configure_connection};
pub use document_row::{DocumentRow, build_document_from_row, encode_document, fetch_document_page};
