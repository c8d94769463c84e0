//! Persistence module split across logical submodules.

mod connection;
mod hymns;
mod store;

pub use connection::{ensure_schema, open_in_memory};
pub use hymns::{delete_hymn, fetch_hymns, upsert_hymn};
pub use store::{HymnRepository, SqliteHymnRepository};
