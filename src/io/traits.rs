//! Core traits for text export.
//!
//! Defines the [`TextSink`] trait that export destinations implement.

use crate::Result;

/// Destination for rendered export lines.
///
/// # Lifecycle
///
/// 1. Create the sink for its destination
/// 2. Call `write_line()` for every `name:value` line and every blank
///    document separator
/// 3. Call `finalize()` once after the last document
///
/// Lines are passed without a trailing newline; the sink appends one.
pub trait TextSink {
    /// Writes a single line.
    ///
    /// # Errors
    ///
    /// Returns an error if I/O fails.
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Completes the export, flushing or writing any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if I/O fails.
    fn finalize(&mut self) -> Result<()>;
}
