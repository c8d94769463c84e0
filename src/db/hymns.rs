use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection};

use crate::models::Hymn;

/// Fetch every custom hymn with its verses, ordered by number.
pub fn fetch_hymns(conn: &Connection) -> Result<Vec<Hymn>> {
    let mut stmt = conn
        .prepare(
            "SELECT number, display_number, title, refrain
             FROM hymns
             ORDER BY number",
        )
        .context("failed to prepare hymn query")?;

    let mut hymns = stmt
        .query_map([], |row| {
            Ok(Hymn {
                number: row.get(0)?,
                display_number: row.get(1)?,
                title: row.get(2)?,
                verses: Vec::new(),
                refrain: row.get(3)?,
            })
        })
        .context("failed to iterate hymns")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect hymns")?;

    for hymn in &mut hymns {
        hymn.verses = fetch_verses(conn, hymn.number)?;
    }

    Ok(hymns)
}

/// Verses of a single hymn in sung order.
fn fetch_verses(conn: &Connection, number: i64) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT text FROM hymn_verses
             WHERE hymn_number = ?1
             ORDER BY position",
        )
        .context("failed to prepare verse query")?;

    let verses = stmt
        .query_map([number], |row| row.get(0))
        .context("failed to iterate verses")?
        .collect::<Result<Vec<String>, _>>()
        .context("failed to collect verses")?;

    Ok(verses)
}

/// Insert a hymn or replace the one with the same number, verses included.
/// Blank refrains are stored as NULL.
pub fn upsert_hymn(conn: &Connection, hymn: &Hymn) -> Result<()> {
    conn.execute(
        "INSERT INTO hymns (number, display_number, title, refrain)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(number) DO UPDATE SET
             display_number = excluded.display_number,
             title = excluded.title,
             refrain = excluded.refrain",
        params![
            hymn.number,
            hymn.display_number,
            hymn.title,
            hymn.refrain_text()
        ],
    )
    .context("failed to save hymn")?;

    conn.execute(
        "DELETE FROM hymn_verses WHERE hymn_number = ?1",
        params![hymn.number],
    )
    .context("failed to clear old verses")?;

    let mut stmt = conn
        .prepare("INSERT INTO hymn_verses (hymn_number, position, text) VALUES (?1, ?2, ?3)")
        .context("failed to prepare verse insert")?;
    for (position, verse) in hymn.verses.iter().enumerate() {
        stmt.execute(params![hymn.number, position as i64, verse])
            .context("failed to save verse")?;
    }

    Ok(())
}

/// Whether a hymn is stored under `number`.
pub fn hymn_exists(conn: &Connection, number: i64) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM hymns WHERE number = ?1)",
        params![number],
        |row| row.get(0),
    )
    .context("failed to look up hymn")
}

/// Remove every custom hymn. Verses cascade.
pub fn clear_hymns(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM hymns", [])
        .context("failed to clear hymns")?;
    Ok(())
}

/// Permanently delete a hymn, surfacing an error when nothing matched.
pub fn delete_hymn(conn: &Connection, number: i64) -> Result<()> {
    let deleted = conn
        .execute("DELETE FROM hymns WHERE number = ?1", params![number])
        .context("failed to delete hymn")?;

    if deleted == 0 {
        Err(anyhow!("Hymn #{number} not found"))
    } else {
        Ok(())
    }
}
