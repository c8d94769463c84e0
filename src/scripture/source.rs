use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{CatalogError, ScriptureError};

use super::books::find_book;
use super::reference::{ScriptureReference, Verse};

const BUILTIN_SCRIPTURE: &str = include_str!("../../data/scripture.json");
/// Psalm 119 is the longest chapter.
const LONGEST_CHAPTER: u32 = 176;

/// Where verse text comes from. The presenter only ever asks for single
/// verses, so a network client, a local file, or a test double all fit.
pub trait VerseSource {
    /// Text of one verse; `None` when the source does not have it.
    fn verse_text(&self, book: &str, chapter: u32, verse: u32) -> Result<Option<String>>;

    /// Highest verse number present in a chapter.
    fn last_verse(&self, book: &str, chapter: u32) -> Result<Option<u32>> {
        for verse in (1..=LONGEST_CHAPTER).rev() {
            if self.verse_text(book, chapter, verse)?.is_some() {
                return Ok(Some(verse));
            }
        }
        Ok(None)
    }
}

#[derive(Deserialize)]
struct ScriptureDocument {
    verses: Vec<Verse>,
}

/// Verses held in memory, loaded from a JSON document of
/// `{ "verses": [ { "book", "chapter", "verse", "text" } ] }`.
#[derive(Debug, Clone, Default)]
pub struct JsonVerseSource {
    verses: HashMap<(&'static str, u32, u32), String>,
    chapter_ends: HashMap<(&'static str, u32), u32>,
}

impl JsonVerseSource {
    /// The sample passages compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_SCRIPTURE)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Self::from_json(&text)?;
        info!(path = %path.display(), verses = source.len(), "loaded scripture");
        Ok(source)
    }

    /// Book names are resolved like typed references; unknown books are
    /// skipped.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let document: ScriptureDocument = serde_json::from_str(text)?;
        let mut source = Self::default();
        for verse in document.verses {
            let Some(book) = find_book(&verse.book) else {
                warn!(book = %verse.book, "skipping verse from unknown book");
                continue;
            };
            let end = source
                .chapter_ends
                .entry((book.name, verse.chapter))
                .or_insert(0);
            *end = (*end).max(verse.verse);
            source
                .verses
                .insert((book.name, verse.chapter, verse.verse), verse.text);
        }
        Ok(source)
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

impl VerseSource for JsonVerseSource {
    fn verse_text(&self, book: &str, chapter: u32, verse: u32) -> Result<Option<String>> {
        let Some(book) = find_book(book) else {
            return Ok(None);
        };
        Ok(self.verses.get(&(book.name, chapter, verse)).cloned())
    }

    fn last_verse(&self, book: &str, chapter: u32) -> Result<Option<u32>> {
        let Some(book) = find_book(book) else {
            return Ok(None);
        };
        Ok(self.chapter_ends.get(&(book.name, chapter)).copied())
    }
}

fn lookup(
    source: &dyn VerseSource,
    book: &str,
    chapter: u32,
    verse: u32,
) -> Result<Option<Verse>> {
    Ok(source
        .verse_text(book, chapter, verse)?
        .map(|text| Verse {
            book: book.to_string(),
            chapter,
            verse,
            text,
        }))
}

/// Every available verse of `reference`, in order. Missing verses inside the
/// range are skipped; an empty result is [`ScriptureError::NotFound`].
pub fn fetch_passage(
    source: &dyn VerseSource,
    reference: &ScriptureReference,
) -> Result<Vec<Verse>> {
    let mut verses = Vec::new();
    for number in reference.verse_start..=reference.last_verse() {
        if let Some(verse) = lookup(source, reference.book, reference.chapter, number)? {
            verses.push(verse);
        }
    }
    if verses.is_empty() {
        return Err(ScriptureError::NotFound.into());
    }
    debug!(%reference, count = verses.len(), "fetched passage");
    Ok(verses)
}

/// The verse after `current`, continuing into the next chapter of the same
/// book. `None` past the end of what the source holds.
pub fn next_verse(source: &dyn VerseSource, current: &Verse) -> Result<Option<Verse>> {
    let following = current.verse.saturating_add(1);
    if let Some(verse) = lookup(source, &current.book, current.chapter, following)? {
        return Ok(Some(verse));
    }
    let has_next_chapter =
        find_book(&current.book).map_or(true, |book| current.chapter < book.chapters);
    if !has_next_chapter {
        return Ok(None);
    }
    lookup(source, &current.book, current.chapter + 1, 1)
}

/// The verse before `current`, stepping back to the last verse of the
/// previous chapter from a chapter's first verse.
pub fn previous_verse(source: &dyn VerseSource, current: &Verse) -> Result<Option<Verse>> {
    if current.verse > 1 {
        return lookup(source, &current.book, current.chapter, current.verse - 1);
    }
    if current.chapter <= 1 {
        return Ok(None);
    }
    let chapter = current.chapter - 1;
    match source.last_verse(&current.book, chapter)? {
        Some(last) => lookup(source, &current.book, chapter, last),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::scripture::parse_reference;

    /// Knows only verse numbers; every chapter has `per_chapter` verses.
    struct Uniform {
        per_chapter: u32,
    }

    impl VerseSource for Uniform {
        fn verse_text(&self, book: &str, chapter: u32, verse: u32) -> Result<Option<String>> {
            Ok((1..=self.per_chapter)
                .contains(&verse)
                .then(|| format!("{book} {chapter}:{verse}")))
        }
    }

    fn at(book: &str, chapter: u32, verse: u32) -> Verse {
        Verse {
            book: book.into(),
            chapter,
            verse,
            text: format!("{book} {chapter}:{verse}"),
        }
    }

    fn position(verse: Option<Verse>) -> Option<(u32, u32)> {
        verse.map(|verse| (verse.chapter, verse.verse))
    }

    #[test]
    fn passage_collects_available_verses() {
        let source = JsonVerseSource::builtin().unwrap();
        let passage = fetch_passage(&source, &parse_reference("Psalm 23:1-6").unwrap()).unwrap();
        assert_eq!(passage.len(), 6);
        assert_eq!(passage[0].book, "Psalms");
        assert!(passage[0].text.starts_with("The LORD is my shepherd"));

        // 3:18 is not in the sample data.
        let partial = fetch_passage(&source, &parse_reference("john 3:16-18").unwrap()).unwrap();
        assert_eq!(partial.len(), 2);
    }

    #[test]
    fn missing_passage_is_not_found() {
        let source = JsonVerseSource::builtin().unwrap();
        let err = fetch_passage(&source, &parse_reference("Jude 1:25").unwrap()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ScriptureError>(),
            Some(&ScriptureError::NotFound)
        );

        // A reversed range asks for nothing.
        assert!(fetch_passage(&source, &parse_reference("Psalm 23:6-1").unwrap()).is_err());
    }

    #[test]
    fn stepping_crosses_chapters() {
        let source = JsonVerseSource::builtin().unwrap();
        let last = at("Psalms", 23, 6);
        let next = next_verse(&source, &last).unwrap().unwrap();
        assert_eq!((next.chapter, next.verse), (24, 1));

        let back = previous_verse(&source, &next).unwrap().unwrap();
        assert_eq!(back, fetch_passage(&source, &parse_reference("Ps 23:6").unwrap()).unwrap()[0]);
    }

    #[test]
    fn stepping_stops_at_book_edges() {
        let source = Uniform { per_chapter: 3 };
        assert_eq!(position(previous_verse(&source, &at("Genesis", 1, 1)).unwrap()), None);
        assert_eq!(position(next_verse(&source, &at("Jude", 1, 3)).unwrap()), None);
        assert_eq!(
            position(next_verse(&source, &at("Genesis", 4, 3)).unwrap()),
            Some((5, 1))
        );
    }

    #[test]
    fn default_last_verse_walks_down() {
        let source = Uniform { per_chapter: 12 };
        assert_eq!(source.last_verse("Mark", 2).unwrap(), Some(12));
        assert_eq!(
            position(previous_verse(&source, &at("Mark", 3, 1)).unwrap()),
            Some((2, 12))
        );
    }

    #[test]
    fn unknown_books_in_document_are_skipped() {
        let source = JsonVerseSource::from_json(
            r#"{"verses": [
                {"book": "Hezekiah", "chapter": 1, "verse": 1, "text": "x"},
                {"book": "john", "chapter": 1, "verse": 1, "text": "In the beginning was the Word"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(source.len(), 1);
        assert_eq!(source.last_verse("John", 1).unwrap(), Some(1));
    }
}
