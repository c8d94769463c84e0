//! Scripture references and verse stepping over an injected [`VerseSource`].

mod books;
mod reference;
mod source;

pub use books::{find_book, BibleBook, BIBLE_BOOKS};
pub use reference::{
    format_range_reference, format_reference, parse_reference, ScriptureReference, Verse,
};
pub use source::{fetch_passage, next_verse, previous_verse, JsonVerseSource, VerseSource};
