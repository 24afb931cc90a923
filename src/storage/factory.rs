//! Blackboard construction from configured names.

use crate::storage::{Blackboard, InMemoryBlackboard, SqliteBlackboard};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Blackboard name selecting the non-persistent in-memory backend.
pub const MEMORY_BLACKBOARD: &str = ":memory:";

/// Returns the database file backing the named blackboard.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the name is empty or contains a path
/// separator.
pub fn blackboard_path(name: &str, data_dir: &Path) -> Result<PathBuf> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput("blackboard name is empty".to_string()));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(Error::InvalidInput(format!(
            "blackboard name '{name}' must not contain path separators"
        )));
    }
    Ok(data_dir.join(format!("{name}.sqlite")))
}

/// Opens the named blackboard.
///
/// [`MEMORY_BLACKBOARD`] yields a fresh [`InMemoryBlackboard`]; any other
/// name opens `<data_dir>/<name>.sqlite`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the name is invalid or the database cannot be opened.
pub fn open_blackboard(name: &str, data_dir: &Path) -> Result<Arc<dyn Blackboard>> {
    if name == MEMORY_BLACKBOARD {
        tracing::debug!("Using in-memory blackboard");
        return Ok(Arc::new(InMemoryBlackboard::new()));
    }

    let path = blackboard_path(name, data_dir)?;
    tracing::debug!(path = %path.display(), "Opening SQLite blackboard");
    Ok(Arc::new(SqliteBlackboard::new(path)?))
}
