//! The hymnal: built-in hymns loaded from JSON, merged with the custom hymns
//! from the store, plus lookup and search over the result.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::models::{Hymn, HymnSummary};

const BUILTIN_HYMNAL: &str = include_str!("../data/hymns.json");
/// First number handed out to hymns whose source number is missing or unusable.
const AUTO_NUMBER_START: i64 = 8001;
/// Base of the internal numbering for the `YS` special series.
const SPECIAL_SERIES_BASE: i64 = 9000;

#[derive(Deserialize)]
struct HymnalDocument {
    hymns: Vec<JsonHymn>,
}

#[derive(Deserialize)]
struct JsonHymn {
    title: String,
    number: Option<String>,
    #[serde(default)]
    verses: Vec<JsonVerse>,
    #[serde(default)]
    refrain: Option<String>,
}

#[derive(Deserialize)]
struct JsonVerse {
    verse: u32,
    text: String,
}

/// Sorted collection of hymns available for presentation.
#[derive(Debug, Clone, Default)]
pub struct Hymnal {
    hymns: Vec<Hymn>,
}

impl Hymnal {
    /// The hymnal compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_HYMNAL)
    }

    /// Load a hymnal document from disk, replacing the built-in one.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let hymnal = Self::from_json(&text)?;
        info!(path = %path.display(), hymns = hymnal.len(), "loaded hymnal");
        Ok(hymnal)
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let document: HymnalDocument = serde_json::from_str(text)?;
        let mut auto_number = AUTO_NUMBER_START;
        let hymns = document
            .hymns
            .into_iter()
            .filter_map(|entry| convert_entry(entry, &mut auto_number))
            .collect();
        Ok(Self::from_hymns(hymns))
    }

    pub fn from_hymns(mut hymns: Vec<Hymn>) -> Self {
        hymns.sort_by_key(|hymn| hymn.number);
        Self { hymns }
    }

    pub fn hymns(&self) -> &[Hymn] {
        &self.hymns
    }

    pub fn len(&self) -> usize {
        self.hymns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hymns.is_empty()
    }

    /// Overlay custom hymns: same number replaces, new numbers are added.
    pub fn merge_custom(&mut self, custom: Vec<Hymn>) {
        let count = custom.len();
        for hymn in custom {
            match self.hymns.iter_mut().find(|existing| existing.number == hymn.number) {
                Some(existing) => *existing = hymn,
                None => self.hymns.push(hymn),
            }
        }
        self.hymns.sort_by_key(|hymn| hymn.number);
        debug!(count, total = self.hymns.len(), "merged custom hymns");
    }

    pub fn get(&self, number: i64) -> Option<&Hymn> {
        self.hymns.iter().find(|hymn| hymn.number == number)
    }

    /// Resolve an operator-typed id: `YS…` labels or a (leading) number.
    pub fn find(&self, id: &str) -> Option<&Hymn> {
        let upper = id.trim().to_uppercase();
        if upper.starts_with("YS") {
            return self.hymns.iter().find(|hymn| {
                hymn.display_number
                    .as_deref()
                    .is_some_and(|display| display.to_uppercase() == upper)
            });
        }
        leading_int(&upper).and_then(|number| self.get(number))
    }

    /// Hymns matching `query` by label, number prefix or title.
    pub fn search(&self, query: &str, limit: usize) -> Vec<HymnSummary> {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return Vec::new();
        }

        let number_query = leading_int(&normalized);
        let is_special = normalized.starts_with("ys");

        let mut results: Vec<&Hymn> = self
            .hymns
            .iter()
            .filter(|hymn| {
                let label_match = hymn.display_number.as_deref().is_some_and(|display| {
                    display.to_lowercase().contains(&normalized)
                });
                let number_match = number_query.is_some()
                    && hymn.number.to_string().starts_with(&normalized);
                label_match || number_match || hymn.title.to_lowercase().contains(&normalized)
            })
            .collect();

        results.sort_by_key(|hymn| {
            let exact_label = is_special
                && hymn.display_number
                    .as_deref()
                    .is_some_and(|display| display.to_lowercase() == normalized);
            let exact_number = number_query == Some(hymn.number);
            (!exact_label, !exact_number, hymn.number)
        });

        results
            .into_iter()
            .take(limit)
            .map(HymnSummary::from)
            .collect()
    }
}

fn convert_entry(entry: JsonHymn, auto_number: &mut i64) -> Option<Hymn> {
    if entry.verses.is_empty() {
        debug!(title = %entry.title, "skipping hymn without verses");
        return None;
    }

    let raw = entry.number.as_deref().map(str::trim).unwrap_or_default();
    let series = raw
        .get(..2)
        .filter(|prefix| prefix.eq_ignore_ascii_case("ys"))
        .and_then(|_| raw.get(2..));
    let (number, display_number) = if let Some(series) = series {
        let offset = match leading_int(series) {
            Some(series) => series,
            None => next_auto(auto_number) - (AUTO_NUMBER_START - 1),
        };
        (SPECIAL_SERIES_BASE + offset, Some(raw.to_uppercase()))
    } else if let Some(number) = leading_int(raw) {
        (number, None)
    } else {
        (next_auto(auto_number), None)
    };

    let mut verses = entry.verses;
    verses.sort_by_key(|verse| verse.verse);

    Some(Hymn {
        number,
        display_number,
        title: entry.title,
        verses: verses.into_iter().map(|verse| verse.text).collect(),
        refrain: entry.refrain.filter(|refrain| !refrain.is_empty()),
    })
}

fn next_auto(counter: &mut i64) -> i64 {
    let number = *counter;
    *counter += 1;
    number
}

/// Integer made of the leading digits (with optional sign), ignoring the rest.
fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };
    let end = digits
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}
