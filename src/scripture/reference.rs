use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ScriptureError;

use super::books::find_book;

/// `Book Chapter:Verse` or `Book Chapter:Start-End`. The book may carry a
/// leading digit (`1 John`) and several words (`Song of Solomon`).
static RE_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([0-9]?\s*[a-z]+(?:\s+[a-z]+)*)\s+([0-9]+):([0-9]+)(?:\s*-\s*([0-9]+))?$")
        .unwrap()
});

/// A parsed reference, with the book resolved to its canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptureReference {
    pub book: &'static str,
    pub chapter: u32,
    pub verse_start: u32,
    pub verse_end: Option<u32>,
}

impl ScriptureReference {
    /// Last verse requested; the start verse for single-verse references.
    pub fn last_verse(&self) -> u32 {
        self.verse_end.unwrap_or(self.verse_start)
    }
}

impl fmt::Display for ScriptureReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse_start)?;
        if let Some(end) = self.verse_end {
            write!(f, "-{end}")?;
        }
        Ok(())
    }
}

/// One verse of text as handed out by a verse source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

/// Parse an operator-typed reference such as `John 3:16` or `ps 23:1-6`.
pub fn parse_reference(input: &str) -> Result<ScriptureReference, ScriptureError> {
    let captures = RE_REFERENCE
        .captures(input.trim())
        .ok_or(ScriptureError::InvalidFormat)?;

    let book_name = &captures[1];
    let book =
        find_book(book_name).ok_or_else(|| ScriptureError::UnknownBook(book_name.to_string()))?;

    let number = |index: usize| -> Result<u32, ScriptureError> {
        captures[index]
            .parse::<u32>()
            .map_err(|_| ScriptureError::InvalidFormat)
    };
    let verse_end = match captures.get(4) {
        Some(_) => Some(number(4)?),
        None => None,
    };

    Ok(ScriptureReference {
        book: book.name,
        chapter: number(2)?,
        verse_start: number(3)?,
        verse_end,
    })
}

/// `John 3:16`
pub fn format_reference(verse: &Verse) -> String {
    format!("{} {}:{}", verse.book, verse.chapter, verse.verse)
}

/// Label for a run of verses: `John 3:16-18`, or `John 3:35 - 4:2` when the
/// run crosses a chapter. Empty for no verses.
pub fn format_range_reference(verses: &[Verse]) -> String {
    let (Some(first), Some(last)) = (verses.first(), verses.last()) else {
        return String::new();
    };
    if verses.len() == 1 {
        return format_reference(first);
    }
    if first.chapter == last.chapter {
        format!(
            "{} {}:{}-{}",
            first.book, first.chapter, first.verse, last.verse
        )
    } else {
        format!(
            "{} {}:{} - {}:{}",
            first.book, first.chapter, first.verse, last.chapter, last.verse
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn verse(chapter: u32, number: u32) -> Verse {
        Verse {
            book: "John".into(),
            chapter,
            verse: number,
            text: String::new(),
        }
    }

    #[test]
    fn single_verse_and_range() {
        assert_eq!(
            parse_reference("John 3:16").unwrap(),
            ScriptureReference {
                book: "John",
                chapter: 3,
                verse_start: 16,
                verse_end: None,
            }
        );
        let range = parse_reference("  psalm 23:1-6 ").unwrap();
        assert_eq!(range.book, "Psalms");
        assert_eq!(range.last_verse(), 6);
        assert_eq!(range.to_string(), "Psalms 23:1-6");
    }

    #[test]
    fn numbered_and_multi_word_books() {
        assert_eq!(parse_reference("1 Cor 13:4 - 7").unwrap().book, "1 Corinthians");
        assert_eq!(parse_reference("1john 4:8").unwrap().book, "1 John");
        assert_eq!(
            parse_reference("Song of Solomon 2:1").unwrap().book,
            "Song of Solomon"
        );
    }

    #[test]
    fn malformed_references() {
        assert_eq!(parse_reference("John 3"), Err(ScriptureError::InvalidFormat));
        assert_eq!(parse_reference("3:16"), Err(ScriptureError::InvalidFormat));
        assert_eq!(parse_reference(""), Err(ScriptureError::InvalidFormat));
        assert_eq!(
            parse_reference("John 99999999999:1"),
            Err(ScriptureError::InvalidFormat)
        );
        assert_eq!(
            parse_reference("Hezekiah 1:1"),
            Err(ScriptureError::UnknownBook("Hezekiah".into()))
        );
    }

    #[test]
    fn range_labels() {
        assert_eq!(format_range_reference(&[]), "");
        assert_eq!(format_range_reference(&[verse(3, 16)]), "John 3:16");
        assert_eq!(
            format_range_reference(&[verse(3, 16), verse(3, 17), verse(3, 18)]),
            "John 3:16-18"
        );
        assert_eq!(
            format_range_reference(&[verse(3, 36), verse(4, 1)]),
            "John 3:36 - 4:1"
        );
    }
}
