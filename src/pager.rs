//! Maps a linear slide index onto the verses and refrain of a hymn.
//!
//! With a refrain the sequence is verse 1, refrain, verse 2, refrain, ... and
//! always ends on a refrain. Without one it is just the verses in order. The
//! interleaved sequence is never materialised; both functions work from the
//! verse count and refrain presence alone.

use crate::models::{DisplayItem, Hymn, ItemKind};

/// Number of addressable display items for `hymn`.
pub fn total_display_items(hymn: &Hymn) -> usize {
    let verses = hymn.verse_count();
    if hymn.has_refrain() {
        verses * 2
    } else {
        verses
    }
}

/// The display item at zero-based `index`, or `None` when out of range.
pub fn display_item_at(hymn: &Hymn, index: usize) -> Option<DisplayItem> {
    if index >= total_display_items(hymn) {
        return None;
    }

    let (text, kind, verse_number) = match hymn.refrain_text() {
        Some(refrain) => {
            let verse_index = index / 2;
            if index % 2 == 1 {
                (refrain, ItemKind::Refrain, None)
            } else {
                (
                    hymn.verses[verse_index].as_str(),
                    ItemKind::Verse,
                    Some(verse_index + 1),
                )
            }
        }
        None => (hymn.verses[index].as_str(), ItemKind::Verse, Some(index + 1)),
    };

    Some(DisplayItem {
        hymn_number: hymn.number,
        hymn_display_number: hymn.display_number.clone(),
        hymn_title: hymn.title.clone(),
        text: text.to_string(),
        kind,
        verse_number,
        total_verses: hymn.verse_count(),
        has_refrain: hymn.has_refrain(),
    })
}
