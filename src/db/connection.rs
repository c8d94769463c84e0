use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::debug;

/// Ensure the database file exists, run lazy migrations, and return a live
/// connection. The function also toggles `PRAGMA foreign_keys = ON` so verse
/// rows cascade when their hymn goes away.
pub fn ensure_schema(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(db_path).context("failed to open SQLite database")?;
    migrate(&conn)?;
    debug!(path = %db_path.display(), "custom hymn store ready");
    Ok(conn)
}

/// Fresh in-memory store with the full schema.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    migrate(&conn)?;
    Ok(conn)
}

fn migrate(conn: &Connection) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign keys")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS hymns (
            number INTEGER PRIMARY KEY,
            display_number TEXT,
            title TEXT NOT NULL,
            refrain TEXT
        )",
        [],
    )
    .context("failed to create hymns table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS hymn_verses (
            hymn_number INTEGER NOT NULL,
            position INTEGER NOT NULL,
            text TEXT NOT NULL,
            PRIMARY KEY (hymn_number, position),
            FOREIGN KEY(hymn_number) REFERENCES hymns(number) ON DELETE CASCADE
        )",
        [],
    )
    .context("failed to create hymn_verses table")?;

    Ok(())
}
