//! # csvboard
//!
//! Adapters between flat tabular text files and a tag-annotated document
//! blackboard.
//!
//! - The importer reads a header-delimited CSV file, infers a numeric or text
//!   type for every cell, attaches resolved tags and inserts one document per row.
//! - The exporter walks the stored documents, projects a field whitelist,
//!   truncates long values and renders `name:value` blocks to the console
//!   and/or a file.
//!
//! The blackboard itself is only consumed through the [`Blackboard`] trait.
//! [`InMemoryBlackboard`] and [`SqliteBlackboard`] are provided as reference
//! backends.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use csvboard::io::{ImportOptions, ImportService};
//! use csvboard::InMemoryBlackboard;
//!
//! let store = Arc::new(InMemoryBlackboard::new());
//! let service = ImportService::new(store);
//! let report = service.import_from_file(
//!     "rows.csv".as_ref(),
//!     &ImportOptions::default().with_tags(["sensor"]),
//! )?;
//! println!("read {} wrote {}", report.items_read, report.items_written);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::path::PathBuf;
use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod io;
pub mod models;
pub mod observability;
pub mod storage;

// Re-exports for convenience
pub use config::{ExportConfig, ImportConfig, RunConfig};
pub use models::{Document, Field, FieldValue, RowLimit, RunReport, Tag, TagId};
pub use storage::{Blackboard, InMemoryBlackboard, SqliteBlackboard};

/// Error type for csvboard operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Malformed configuration values, unknown blackboard names |
/// | `OperationFailed` | Blackboard lookups, inserts or iteration fail |
/// | `Io` | Opening, reading or writing a CSV or text file fails |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A configuration file contains a value of the wrong shape
    /// - A numeric option such as `ROW_LIMIT` is not an integer
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - `SQLite` statements fail or a stored row cannot be decoded
    /// - A backend returns a tag identifier of zero
    /// - Logging initialisation fails
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A file could not be opened, read or written.
    #[error("i/o error on '{}': {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Builds an [`Error::OperationFailed`] from any displayable cause.
    pub fn operation(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }

    /// Builds an [`Error::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for csvboard operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("ROW_LIMIT is not an integer".to_string());
        assert_eq!(
            err.to_string(),
            "invalid input: ROW_LIMIT is not an integer"
        );

        let err = Error::operation("insert_document", "disk full");
        assert_eq!(
            err.to_string(),
            "operation 'insert_document' failed: disk full"
        );

        let err = Error::io(
            "/tmp/rows.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "i/o error on '/tmp/rows.csv': denied");
    }
}
