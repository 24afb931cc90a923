//! Shared connection handling for the `SQLite` blackboard.

use crate::{Error, Result};
use rusqlite::Connection;
use std::sync::{Mutex, MutexGuard};

/// Acquires a mutex lock, recovering the inner value if it was poisoned.
///
/// A panic inside a previous critical section leaves the connection itself
/// usable, so the guard is recovered and a warning is logged.
pub fn acquire_lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("SQLite mutex was poisoned, recovering");
            poisoned.into_inner()
        },
    }
}

/// Configures a connection for a single-writer workload.
///
/// - **WAL mode**: readers are not blocked by the writer
/// - **NORMAL synchronous**: fsync at checkpoints only
/// - **`busy_timeout`**: wait up to 5 seconds on a locked database
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if the busy timeout cannot be applied.
pub fn configure_connection(conn: &Connection) -> Result<()> {
    // journal_mode returns a row ("wal"/"memory"), which is ignored
    let _ = conn.pragma_update(None, "journal_mode", "WAL");
    let _ = conn.pragma_update(None, "synchronous", "NORMAL");
    conn.pragma_update(None, "busy_timeout", "5000")
        .map_err(|e| Error::operation("configure_sqlite", e))?;

    Ok(())
}
