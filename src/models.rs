//! Domain models shared by the pager, the paginator, the store and the TUI.
//! They are plain data holders; the interesting logic lives in `pager` and
//! `paginate`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A hymn as loaded from the built-in hymnal or the custom hymn store.
///
/// Verse order is fixed at construction. A hymn has at most one refrain that
/// is sung after every verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hymn {
    /// Primary key. Special series hymns live in the 9000 range.
    pub number: i64,
    /// Alternate label such as `YS1`, used for lookup and headers only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_number: Option<String>,
    pub title: String,
    /// Each verse is an opaque multi-line block.
    pub verses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refrain: Option<String>,
}

impl Hymn {
    pub fn new(number: i64, title: impl Into<String>, verses: Vec<String>) -> Self {
        Self {
            number,
            display_number: None,
            title: title.into(),
            verses,
            refrain: None,
        }
    }

    pub fn with_refrain(mut self, refrain: impl Into<String>) -> Self {
        self.refrain = Some(refrain.into());
        self
    }

    pub fn with_display_number(mut self, display_number: impl Into<String>) -> Self {
        self.display_number = Some(display_number.into());
        self
    }

    /// The refrain to sing, if any. A blank refrain counts as no refrain; every
    /// caller goes through here so the rule is applied in one place.
    pub fn refrain_text(&self) -> Option<&str> {
        self.refrain
            .as_deref()
            .filter(|refrain| !refrain.trim().is_empty())
    }

    pub fn has_refrain(&self) -> bool {
        self.refrain_text().is_some()
    }

    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }

    /// Label shown in headers: the alternate label when present, otherwise
    /// the number.
    pub fn label(&self) -> String {
        match &self.display_number {
            Some(display) => display.clone(),
            None => self.number.to_string(),
        }
    }

    /// Short summary such as `4 verses + refrain` used by the manager list.
    pub fn shape(&self) -> String {
        let noun = if self.verses.len() == 1 { "verse" } else { "verses" };
        if self.has_refrain() {
            format!("{} {noun} + refrain", self.verses.len())
        } else {
            format!("{} {noun}", self.verses.len())
        }
    }
}

impl fmt::Display for Hymn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.label(), self.title)
    }
}

/// Whether a display item shows a verse or the refrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Verse,
    Refrain,
}

/// One screen's worth of hymn content, derived from a [`Hymn`] and an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub hymn_number: i64,
    pub hymn_display_number: Option<String>,
    pub hymn_title: String,
    pub text: String,
    pub kind: ItemKind,
    /// 1-based, present for verses only.
    pub verse_number: Option<usize>,
    /// Number of verses in the hymn, not the number of display items.
    pub total_verses: usize,
    pub has_refrain: bool,
}

impl DisplayItem {
    /// Header line, e.g. `Hymn YS1 - Title`.
    pub fn heading(&self) -> String {
        let label = match &self.hymn_display_number {
            Some(display) => display.clone(),
            None => self.hymn_number.to_string(),
        };
        format!("Hymn {label} - {}", self.hymn_title)
    }

    /// Caption under the text: `Verse 2 of 4` or `Refrain`.
    pub fn caption(&self) -> String {
        match (self.kind, self.verse_number) {
            (ItemKind::Verse, Some(number)) => {
                format!("Verse {number} of {}", self.total_verses)
            }
            (ItemKind::Verse, None) => "Verse".to_string(),
            (ItemKind::Refrain, _) => "Refrain".to_string(),
        }
    }
}

/// One screen's worth of quick-display text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    /// Numeric marker that opened the page; absent for leading unnumbered text.
    pub number: Option<u64>,
    /// Trimmed, non-empty lines.
    pub lines: Vec<String>,
}

impl Page {
    /// `Section N` for numbered pages, `Part i` (1-based position) otherwise.
    pub fn caption(&self, index: usize) -> String {
        match self.number {
            Some(number) => format!("Section {number}"),
            None => format!("Part {}", index + 1),
        }
    }
}

/// Search hit returned by the hymnal lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HymnSummary {
    pub number: i64,
    pub display_number: Option<String>,
    pub title: String,
}

impl HymnSummary {
    pub fn display_title(&self) -> String {
        match &self.display_number {
            Some(display) => format!("{display} - {}", self.title),
            None => format!("{} - {}", self.number, self.title),
        }
    }
}

impl From<&Hymn> for HymnSummary {
    fn from(hymn: &Hymn) -> Self {
        Self {
            number: hymn.number,
            display_number: hymn.display_number.clone(),
            title: hymn.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_refrain_counts_as_absent() {
        let hymn = Hymn::new(1, "Test", vec!["a".into()]).with_refrain("  \n ");
        assert_eq!(hymn.refrain_text(), None);
        assert!(!hymn.has_refrain());
        assert_eq!(hymn.shape(), "1 verse");
    }

    #[test]
    fn label_prefers_display_number() {
        let hymn = Hymn::new(9001, "Special", vec!["a".into(), "b".into()])
            .with_display_number("YS1")
            .with_refrain("r");
        assert_eq!(hymn.label(), "YS1");
        assert_eq!(hymn.shape(), "2 verses + refrain");
        assert_eq!(hymn.to_string(), "#YS1 Special");
    }

    #[test]
    fn page_caption_falls_back_to_position() {
        let numbered = Page {
            number: Some(3),
            lines: vec!["x".into()],
        };
        let loose = Page {
            number: None,
            lines: vec!["y".into()],
        };
        assert_eq!(numbered.caption(0), "Section 3");
        assert_eq!(loose.caption(1), "Part 2");
    }
}
