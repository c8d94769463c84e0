use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;
use tracing::info;

use crate::models::Hymn;

use super::hymns::{clear_hymns, delete_hymn, fetch_hymns, hymn_exists, upsert_hymn};

/// Storage for operator-added hymns. Components receive one of these instead
/// of reaching for a global store, which keeps the pager and paginator free
/// of persistence concerns.
pub trait HymnRepository {
    fn load(&self) -> Result<Vec<Hymn>>;
    /// Replace the whole stored list.
    fn save(&mut self, hymns: &[Hymn]) -> Result<()>;
    /// Add a hymn or replace the stored one with the same number.
    fn upsert(&mut self, hymn: &Hymn) -> Result<()>;
    /// Move the hymn stored under `previous` to `hymn.number`, replacing its
    /// content. Fails when another hymn already holds the new number.
    fn rename(&mut self, previous: i64, hymn: &Hymn) -> Result<()>;
    fn delete(&mut self, number: i64) -> Result<()>;
}

/// SQLite-backed repository. Every write runs in its own transaction.
pub struct SqliteHymnRepository {
    conn: Connection,
}

impl SqliteHymnRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl HymnRepository for SqliteHymnRepository {
    fn load(&self) -> Result<Vec<Hymn>> {
        fetch_hymns(&self.conn)
    }

    fn save(&mut self, hymns: &[Hymn]) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .context("failed to begin transaction")?;
        clear_hymns(&tx)?;
        for hymn in hymns {
            validate(hymn)?;
            upsert_hymn(&tx, hymn)?;
        }
        tx.commit().context("failed to commit hymn list")?;
        info!(count = hymns.len(), "saved custom hymn list");
        Ok(())
    }

    fn upsert(&mut self, hymn: &Hymn) -> Result<()> {
        validate(hymn)?;
        let tx = self
            .conn
            .transaction()
            .context("failed to begin transaction")?;
        upsert_hymn(&tx, hymn)?;
        tx.commit().context("failed to commit hymn")?;
        info!(number = hymn.number, title = %hymn.title, "saved custom hymn");
        Ok(())
    }

    fn rename(&mut self, previous: i64, hymn: &Hymn) -> Result<()> {
        if previous == hymn.number {
            return self.upsert(hymn);
        }
        validate(hymn)?;
        let tx = self
            .conn
            .transaction()
            .context("failed to begin transaction")?;
        if hymn_exists(&tx, hymn.number)? {
            return Err(anyhow!("Hymn #{} already exists.", hymn.number));
        }
        delete_hymn(&tx, previous)?;
        upsert_hymn(&tx, hymn)?;
        tx.commit().context("failed to commit renamed hymn")?;
        info!(previous, number = hymn.number, "renumbered custom hymn");
        Ok(())
    }

    fn delete(&mut self, number: i64) -> Result<()> {
        delete_hymn(&self.conn, number)?;
        info!(number, "deleted custom hymn");
        Ok(())
    }
}

/// The store never accepts a hymn the pager could not present.
fn validate(hymn: &Hymn) -> Result<()> {
    if hymn.verses.is_empty() {
        return Err(anyhow!("Hymn #{} has no verses.", hymn.number));
    }
    if hymn.title.trim().is_empty() {
        return Err(anyhow!("Hymn #{} has no title.", hymn.number));
    }
    Ok(())
}
