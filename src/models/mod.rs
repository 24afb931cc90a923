//! Data models for csvboard.
//!
//! Documents, their typed fields, tag identifiers and the bookkeeping types
//! shared by the import and export paths.

mod document;
mod limit;
mod report;
mod tag;

pub use document::{Document, Field, FieldValue};
pub use limit::RowLimit;
pub use report::RunReport;
pub use tag::{Tag, TagId};
