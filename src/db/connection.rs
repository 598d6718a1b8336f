use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use crate::error::StoreResult;

/// Open the SQLite file at `path`, creating it (and its parent directory) when
/// absent, and make sure the `students` table exists.
pub fn open_store(path: impl AsRef<Path>) -> StoreResult<Connection> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path)?;
    ensure_schema(&conn)?;
    info!(path = %path.display(), "student store opened");
    Ok(conn)
}

/// In-memory variant of [`open_store`], used by the test suites.
pub fn open_store_in_memory() -> StoreResult<Connection> {
    let conn = Connection::open_in_memory()?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Create the `students` table if it does not exist yet. `id` is a plain
/// `INTEGER PRIMARY KEY` (no AUTOINCREMENT) so new rows get `max(id) + 1`,
/// which keeps ids contiguous after a renumbering delete.
pub fn ensure_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS students (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            age INTEGER NOT NULL
        )",
        [],
    )?;
    Ok(())
}
