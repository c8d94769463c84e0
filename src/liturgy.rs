//! Fixed liturgy pieces (sung responses, creeds, prayers) shown as a whole.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::CatalogError;

const BUILTIN_LITURGY: &str = include_str!("../data/liturgy.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiturgyKind {
    Hymn,
    Creed,
    Prayer,
}

/// A sung stanza. Unnumbered stanzas carry no caption.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiturgyVerse {
    #[serde(default)]
    pub number: Option<u32>,
    pub lines: Vec<String>,
    #[serde(default)]
    pub is_refrain: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiturgyItem {
    pub id: String,
    pub title: String,
    /// Label used in the picker.
    pub short_title: String,
    #[serde(rename = "type")]
    pub kind: LiturgyKind,
    #[serde(default)]
    pub verses: Vec<LiturgyVerse>,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

/// One captioned block of a liturgy item, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiturgySection {
    pub caption: Option<String>,
    pub lines: Vec<String>,
    pub is_refrain: bool,
}

impl LiturgyItem {
    /// Sung items show their stanzas; everything else shows paragraphs.
    pub fn is_sung(&self) -> bool {
        self.kind == LiturgyKind::Hymn && !self.verses.is_empty()
    }

    pub fn sections(&self) -> Vec<LiturgySection> {
        if self.is_sung() {
            return self
                .verses
                .iter()
                .map(|verse| LiturgySection {
                    caption: verse.number.map(|number| {
                        if verse.is_refrain {
                            "Refrain".to_string()
                        } else {
                            format!("Verse {number}")
                        }
                    }),
                    lines: verse.lines.clone(),
                    is_refrain: verse.is_refrain,
                })
                .collect();
        }
        self.paragraphs
            .iter()
            .map(|paragraph| LiturgySection {
                caption: None,
                lines: vec![paragraph.clone()],
                is_refrain: false,
            })
            .collect()
    }
}

#[derive(Deserialize)]
struct LiturgyDocument {
    items: Vec<LiturgyItem>,
}

/// Liturgy items in the order the document lists them.
#[derive(Debug, Clone, Default)]
pub struct Liturgy {
    items: Vec<LiturgyItem>,
}

impl Liturgy {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_LITURGY)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let liturgy = Self::from_json(&text)?;
        info!(path = %path.display(), items = liturgy.len(), "loaded liturgy");
        Ok(liturgy)
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let document: LiturgyDocument = serde_json::from_str(text)?;
        Ok(Self {
            items: document.items,
        })
    }

    pub fn items(&self) -> &[LiturgyItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&LiturgyItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_items_load_in_order() {
        let liturgy = Liturgy::builtin().unwrap();
        let ids: Vec<&str> = liturgy.items().iter().map(|item| item.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "introit",
                "nicene-creed",
                "soul-of-my-saviour",
                "apostles-creed",
                "lords-prayer",
                "gloria-patri"
            ]
        );
        assert_eq!(liturgy.get("nicene-creed").unwrap().short_title, "Nicene");
        assert!(liturgy.get("te-deum").is_none());
    }

    #[test]
    fn sung_items_caption_verses_and_refrain() {
        let liturgy = Liturgy::builtin().unwrap();
        let captions: Vec<Option<String>> = liturgy
            .get("gloria-patri")
            .unwrap()
            .sections()
            .into_iter()
            .map(|section| section.caption)
            .collect();
        assert_eq!(
            captions,
            vec![Some("Verse 1".to_string()), Some("Refrain".to_string())]
        );
    }

    #[test]
    fn creeds_are_uncaptioned_paragraphs() {
        let liturgy = Liturgy::builtin().unwrap();
        let creed = liturgy.get("apostles-creed").unwrap();
        assert!(!creed.is_sung());
        let sections = creed.sections();
        assert_eq!(sections.len(), 3);
        assert!(sections.iter().all(|section| section.caption.is_none()));
        assert!(sections[0].lines[0].starts_with("I believe in God"));
    }

    #[test]
    fn unnumbered_stanzas_and_missing_content() {
        let liturgy = Liturgy::from_json(
            r#"{"items": [
                {"id": "a", "title": "A", "shortTitle": "A", "type": "hymn",
                 "verses": [{"lines": ["only line"]}]},
                {"id": "b", "title": "B", "shortTitle": "B", "type": "prayer"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(liturgy.get("a").unwrap().sections()[0].caption, None);
        assert!(liturgy.get("b").unwrap().sections().is_empty());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = Liturgy::from_json(
            r#"{"items": [{"id": "a", "title": "A", "shortTitle": "A", "type": "sermon"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
