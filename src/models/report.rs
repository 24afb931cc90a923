//! Per-run bookkeeping.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Counts reported by every import or export run.
///
/// Import fills both counts; export only reads, so `items_written` stays 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Rows or documents read.
    pub items_read: usize,
    /// Documents created.
    pub items_written: usize,
}

impl RunReport {
    /// Creates a report with the given counts.
    #[must_use]
    pub const fn new(items_read: usize, items_written: usize) -> Self {
        Self {
            items_read,
            items_written,
        }
    }

    /// Writes the report as pretty JSON, replacing the file.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::operation("serialize_report", e))?;
        std::fs::write(path, json).map_err(|e| Error::io(path, e))
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "read: {}, written: {}", self.items_read, self.items_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        RunReport::new(4, 3).write_json(&path).unwrap();

        let parsed: RunReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, RunReport::new(4, 3));
    }

    #[test]
    fn test_display() {
        assert_eq!(RunReport::new(2, 0).to_string(), "read: 2, written: 0");
    }
}
