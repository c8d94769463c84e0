//! Core library surface for the hymn projector.
//!
//! The presentation logic (slide sequencing, text pagination, content
//! classification, scripture references) lives in plain modules so the `bin` target and the tests
//! drive the same pieces the TUI does.
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod liturgy;
pub mod logging;
pub mod media;
pub mod models;
pub mod navigation;
pub mod pager;
pub mod paginate;
pub mod parse;
pub mod scripture;
pub mod ui;

pub use catalog::Hymnal;
pub use config::{data_dir, load_config, AppConfig};
pub use db::{ensure_schema, HymnRepository, SqliteHymnRepository};
pub use liturgy::{Liturgy, LiturgyItem, LiturgyKind, LiturgySection, LiturgyVerse};
pub use logging::init_tracing;
pub use media::QuickContent;
pub use models::{DisplayItem, Hymn, HymnSummary, ItemKind, Page};
pub use navigation::Cursor;
pub use pager::{display_item_at, total_display_items};
pub use paginate::{is_paginated, paginate};
pub use parse::{parse_hymn_text, ParsedHymn};
pub use scripture::{
    fetch_passage, next_verse, parse_reference, previous_verse, JsonVerseSource,
    ScriptureReference, Verse, VerseSource,
};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
