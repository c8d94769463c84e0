//! Turns a pasted hymn submission into a [`Hymn`].
//!
//! Expected shape:
//!
//! ```text
//! 523 Higher Ground
//! 1. I'm pressing on the upward way,
//! New heights I'm gaining every day;
//! Refrain:
//! Lord, lift me up and let me stand,
//! 2. My heart has no desire to stay
//! ```
//!
//! The optional header line may carry the number and title. A later
//! `Refrain:` block repeating the first one is ignored.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseHymnError;
use crate::models::Hymn;

static RE_VERSE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)[.)]\s*(.*)$").unwrap());
static RE_REFRAIN_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:refrain|chorus)\s*(?::\s*(.*))?$").unwrap());
static RE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:hymn\s*)?#?\s*([0-9]+)\s*[-.:]?\s*(.*)$").unwrap());

/// Result of parsing a submission before operator overrides are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHymn {
    pub number: Option<i64>,
    pub title: Option<String>,
    pub verses: Vec<String>,
    pub refrain: Option<String>,
}

impl ParsedHymn {
    /// Build the final hymn, letting non-blank overrides win over whatever the
    /// header supplied.
    pub fn into_hymn(
        self,
        number_override: Option<i64>,
        title_override: Option<&str>,
    ) -> Result<Hymn, ParseHymnError> {
        let number = number_override
            .or(self.number)
            .ok_or(ParseHymnError::MissingNumber)?;
        let title = title_override
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .map(str::to_string)
            .or(self.title)
            .ok_or(ParseHymnError::MissingTitle)?;

        Ok(Hymn {
            number,
            display_number: None,
            title,
            verses: self.verses,
            refrain: self.refrain,
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Verse,
    Refrain,
    /// A repeated refrain block; its lines are dropped.
    Repeat,
}

/// Parse a submission. Fails when the text is blank or holds no numbered verse.
pub fn parse_hymn_text(text: &str) -> Result<ParsedHymn, ParseHymnError> {
    if text.trim().is_empty() {
        return Err(ParseHymnError::Empty);
    }

    let mut header: Vec<&str> = Vec::new();
    let mut verses: Vec<String> = Vec::new();
    let mut refrain: Option<String> = None;
    let mut section = Section::Header;
    let mut buffer: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(captures) = RE_VERSE_MARKER.captures(trimmed) {
            flush(section, &mut buffer, &mut verses, &mut refrain);
            section = Section::Verse;
            push_rest(&mut buffer, captures.get(2).map(|m| m.as_str()));
        } else if let Some(captures) = RE_REFRAIN_MARKER.captures(trimmed) {
            flush(section, &mut buffer, &mut verses, &mut refrain);
            if refrain.is_some() {
                section = Section::Repeat;
            } else {
                section = Section::Refrain;
                push_rest(&mut buffer, captures.get(1).map(|m| m.as_str()));
            }
        } else {
            match section {
                Section::Header => header.push(trimmed),
                Section::Verse | Section::Refrain => buffer.push(trimmed),
                Section::Repeat => {}
            }
        }
    }
    flush(section, &mut buffer, &mut verses, &mut refrain);

    if verses.is_empty() {
        return Err(ParseHymnError::NoVerses);
    }

    let (number, title) = header.first().map(|line| parse_header(line)).unwrap_or_default();

    Ok(ParsedHymn {
        number,
        title,
        verses,
        refrain,
    })
}

fn push_rest<'a>(buffer: &mut Vec<&'a str>, rest: Option<&'a str>) {
    if let Some(rest) = rest.map(str::trim).filter(|rest| !rest.is_empty()) {
        buffer.push(rest);
    }
}

fn flush(
    section: Section,
    buffer: &mut Vec<&str>,
    verses: &mut Vec<String>,
    refrain: &mut Option<String>,
) {
    if buffer.is_empty() {
        return;
    }
    let text = buffer.join("\n");
    buffer.clear();
    match section {
        Section::Verse => verses.push(text),
        Section::Refrain => *refrain = Some(text),
        Section::Header | Section::Repeat => {}
    }
}

fn parse_header(line: &str) -> (Option<i64>, Option<String>) {
    match RE_HEADER.captures(line) {
        Some(captures) => {
            let number = captures[1].parse::<i64>().ok();
            let title = captures
                .get(2)
                .map(|m| m.as_str().trim())
                .filter(|title| !title.is_empty())
                .map(str::to_string);
            (number, title)
        }
        None => (None, Some(line.to_string())),
    }
}
