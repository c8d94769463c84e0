use anyhow::Result;

use crate::catalog::Hymnal;
use crate::liturgy::{LiturgyItem, LiturgySection};
use crate::media::QuickContent;
use crate::models::{DisplayItem, Hymn, HymnSummary, Page};
use crate::navigation::Cursor;
use crate::pager::{display_item_at, total_display_items};
use crate::scripture::{format_range_reference, next_verse, previous_verse, Verse, VerseSource};

/// Hymn lookup: the typed query plus live suggestions.
#[derive(Default)]
pub(crate) struct LookupScreen {
    pub(crate) query: String,
    pub(crate) results: Vec<HymnSummary>,
    pub(crate) selected: usize,
}

impl LookupScreen {
    pub(crate) fn push_char(&mut self, ch: char, hymnal: &Hymnal, limit: usize) {
        self.query.push(ch);
        self.refresh(hymnal, limit);
    }

    pub(crate) fn backspace(&mut self, hymnal: &Hymnal, limit: usize) {
        self.query.pop();
        self.refresh(hymnal, limit);
    }

    pub(crate) fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
        self.selected = 0;
    }

    pub(crate) fn refresh(&mut self, hymnal: &Hymnal, limit: usize) {
        self.results = hymnal.search(&self.query, limit);
        self.selected = 0;
    }

    /// Suggestions wrap around like a dropdown.
    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.results.is_empty() {
            return;
        }
        let len = self.results.len() as isize;
        self.selected = (self.selected as isize + offset).rem_euclid(len) as usize;
    }

    /// The hymn to open on Enter: an exact id wins over the highlighted
    /// suggestion when the query is numeric or a `YS` label.
    pub(crate) fn resolve<'a>(&self, hymnal: &'a Hymnal) -> Option<&'a Hymn> {
        let query = self.query.trim();
        if query.is_empty() {
            return None;
        }
        hymnal.find(query).or_else(|| {
            self.results
                .get(self.selected)
                .and_then(|hit| hymnal.get(hit.number))
        })
    }
}

/// Screen the hymn and quick displays return to on Esc.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Origin {
    Lookup,
    Manager,
}

/// A hymn being presented slide by slide.
pub(crate) struct HymnScreen {
    pub(crate) hymn: Hymn,
    pub(crate) cursor: Cursor,
    pub(crate) origin: Origin,
}

impl HymnScreen {
    pub(crate) fn new(hymn: Hymn, origin: Origin) -> Self {
        let cursor = Cursor::new(total_display_items(&hymn));
        Self {
            hymn,
            cursor,
            origin,
        }
    }

    pub(crate) fn current_item(&self) -> Option<DisplayItem> {
        display_item_at(&self.hymn, self.cursor.index())
    }
}

/// Pasted text or a media link on the quick display.
pub(crate) struct QuickScreen {
    pub(crate) content: QuickContent,
    pub(crate) cursor: Cursor,
}

impl QuickScreen {
    pub(crate) fn new(content: QuickContent) -> Self {
        let cursor = Cursor::new(content.page_count());
        Self { content, cursor }
    }

    pub(crate) fn current_page(&self) -> Option<&Page> {
        match &self.content {
            QuickContent::Text(pages) => pages.get(self.cursor.index()),
            _ => None,
        }
    }

    /// Only multi-page text navigates.
    pub(crate) fn next(&mut self) -> bool {
        self.content.is_paginated() && self.cursor.next()
    }

    pub(crate) fn previous(&mut self) -> bool {
        self.content.is_paginated() && self.cursor.previous()
    }
}

/// Scripture on screen one verse at a time, starting from a requested passage.
pub(crate) struct ScriptureScreen {
    /// Label of the passage that was asked for, e.g. `John 3:16-17`.
    pub(crate) requested: String,
    pub(crate) verse: Verse,
}

impl ScriptureScreen {
    /// `None` for an empty passage.
    pub(crate) fn new(passage: Vec<Verse>) -> Option<Self> {
        let requested = format_range_reference(&passage);
        let verse = passage.into_iter().next()?;
        Some(Self { requested, verse })
    }

    /// Step forward through the source. Returns whether a verse followed.
    pub(crate) fn next(&mut self, source: &dyn VerseSource) -> Result<bool> {
        Ok(match next_verse(source, &self.verse)? {
            Some(verse) => {
                self.verse = verse;
                true
            }
            None => false,
        })
    }

    pub(crate) fn previous(&mut self, source: &dyn VerseSource) -> Result<bool> {
        Ok(match previous_verse(source, &self.verse)? {
            Some(verse) => {
                self.verse = verse;
                true
            }
            None => false,
        })
    }
}

/// A liturgy item shown in full, scrolled by line.
pub(crate) struct LiturgyScreen {
    pub(crate) item: LiturgyItem,
    pub(crate) sections: Vec<LiturgySection>,
    pub(crate) scroll: u16,
}

impl LiturgyScreen {
    pub(crate) fn new(item: LiturgyItem) -> Self {
        let sections = item.sections();
        Self {
            item,
            sections,
            scroll: 0,
        }
    }

    /// Rows before wrapping: captions, lines, and a gap between sections.
    pub(crate) fn line_count(&self) -> usize {
        self.sections
            .iter()
            .map(|section| section.lines.len() + usize::from(section.caption.is_some()))
            .sum::<usize>()
            + self.sections.len().saturating_sub(1)
    }

    pub(crate) fn scroll_by(&mut self, offset: isize) {
        let max = self.line_count().saturating_sub(1) as isize;
        let next = (self.scroll as isize + offset).clamp(0, max);
        self.scroll = u16::try_from(next).unwrap_or(u16::MAX);
    }

    pub(crate) fn scroll_home(&mut self) {
        self.scroll = 0;
    }
}

/// Wrapper around the custom hymn list shown by the manager screen.
pub(crate) struct ManagerScreen {
    pub(crate) hymns: Vec<Hymn>,
    pub(crate) selected: usize,
}

impl ManagerScreen {
    pub(crate) fn new(hymns: Vec<Hymn>) -> Self {
        let mut screen = Self { hymns, selected: 0 };
        screen.ensure_in_bounds();
        screen
    }

    pub(crate) fn current_hymn(&self) -> Option<&Hymn> {
        self.hymns.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.hymns.is_empty() {
            return;
        }
        let len = self.hymns.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.hymns.len().saturating_sub(1);
    }

    /// Swap in a fresh list, keeping focus on `focus` when it is still there.
    pub(crate) fn set_hymns(&mut self, hymns: Vec<Hymn>, focus: Option<i64>) {
        self.hymns = hymns;
        if let Some(number) = focus {
            if let Some(index) = self.hymns.iter().position(|hymn| hymn.number == number) {
                self.selected = index;
            }
        }
        self.ensure_in_bounds();
    }

    pub(crate) fn ensure_in_bounds(&mut self) {
        if self.hymns.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.hymns.len() {
            self.selected = self.hymns.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liturgy::Liturgy;
    use crate::models::ItemKind;
    use crate::scripture::{fetch_passage, parse_reference, JsonVerseSource};

    #[test]
    fn lookup_prefers_exact_number() {
        let hymnal = Hymnal::builtin().unwrap();
        let mut lookup = LookupScreen::default();
        for ch in "12".chars() {
            lookup.push_char(ch, &hymnal, 10);
        }
        // "12" matches 129 by prefix but there is no hymn 12.
        assert_eq!(lookup.resolve(&hymnal).unwrap().number, 129);

        lookup.clear();
        for ch in "grace".chars() {
            lookup.push_char(ch, &hymnal, 10);
        }
        assert_eq!(lookup.resolve(&hymnal).unwrap().number, 378);
    }

    #[test]
    fn lookup_selection_wraps() {
        let hymnal = Hymnal::builtin().unwrap();
        let mut lookup = LookupScreen::default();
        lookup.push_char('1', &hymnal, 10);
        let len = lookup.results.len();
        assert!(len > 1);
        lookup.move_selection(-1);
        assert_eq!(lookup.selected, len - 1);
        lookup.move_selection(1);
        assert_eq!(lookup.selected, 0);
    }

    #[test]
    fn hymn_screen_walks_refrain_sequence() {
        let hymn = Hymn::new(1, "T", vec!["a".into(), "b".into()]).with_refrain("r");
        let mut screen = HymnScreen::new(hymn, Origin::Lookup);
        let mut kinds = vec![screen.current_item().unwrap().kind];
        while screen.cursor.next() {
            kinds.push(screen.current_item().unwrap().kind);
        }
        assert_eq!(
            kinds,
            vec![
                ItemKind::Verse,
                ItemKind::Refrain,
                ItemKind::Verse,
                ItemKind::Refrain
            ]
        );
    }

    #[test]
    fn single_page_quick_text_does_not_navigate() {
        let mut screen = QuickScreen::new(QuickContent::classify("Hello\nWorld"));
        assert!(!screen.next());
        assert_eq!(screen.current_page().unwrap().lines.len(), 2);

        let mut paged = QuickScreen::new(QuickContent::classify("1. a\n2. b"));
        assert!(paged.next());
        assert!(!paged.next());
        assert_eq!(paged.current_page().unwrap().number, Some(2));
        assert!(paged.previous());
    }

    #[test]
    fn scripture_steps_through_the_source() {
        let source = JsonVerseSource::builtin().unwrap();
        let passage = fetch_passage(&source, &parse_reference("Psalm 23:5-6").unwrap()).unwrap();
        let mut screen = ScriptureScreen::new(passage).unwrap();
        assert_eq!(screen.requested, "Psalms 23:5-6");

        assert!(screen.next(&source).unwrap());
        assert!(screen.next(&source).unwrap());
        assert_eq!((screen.verse.chapter, screen.verse.verse), (24, 1));
        assert!(screen.previous(&source).unwrap());
        assert_eq!((screen.verse.chapter, screen.verse.verse), (23, 6));

        assert!(ScriptureScreen::new(Vec::new()).is_none());
    }

    #[test]
    fn liturgy_scroll_is_clamped() {
        let liturgy = Liturgy::builtin().unwrap();
        let mut screen = LiturgyScreen::new(liturgy.get("gloria-patri").unwrap().clone());
        // Two captioned stanzas of two lines with one gap.
        assert_eq!(screen.line_count(), 7);
        screen.scroll_by(-3);
        assert_eq!(screen.scroll, 0);
        screen.scroll_by(50);
        assert_eq!(screen.scroll, 6);
        screen.scroll_home();
        assert_eq!(screen.scroll, 0);
    }

    #[test]
    fn manager_keeps_focus_on_reload() {
        let hymns = vec![
            Hymn::new(1, "A", vec!["a".into()]),
            Hymn::new(2, "B", vec!["b".into()]),
        ];
        let mut manager = ManagerScreen::new(hymns.clone());
        manager.set_hymns(hymns, Some(2));
        assert_eq!(manager.current_hymn().unwrap().number, 2);
        manager.set_hymns(Vec::new(), Some(2));
        assert!(manager.current_hymn().is_none());
        manager.move_selection(3);
        assert_eq!(manager.selected, 0);
    }
}
