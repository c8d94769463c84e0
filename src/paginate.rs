//! Splits pasted text into pages at leading numeric markers such as `1.`,
//! `2)`, `3:` or `4 `.
//!
//! Any line that starts with digits followed by one of those separators opens
//! a new page, so a sentence like `3 wise men came` is read as a marker for
//! page 3. Text without markers comes back as a single unnumbered page.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Page;

static RE_PAGE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)[.):\s]\s*").unwrap());

/// Segment `text` into pages. Blank lines are skipped and pages that never
/// receive a line are dropped, so the result may be empty.
pub fn paginate(text: &str) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut current: Option<Page> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some((number, rest)) = split_marker(trimmed) {
            if let Some(page) = current.take().filter(|page| !page.lines.is_empty()) {
                pages.push(page);
            }
            let mut page = Page {
                number: Some(number),
                lines: Vec::new(),
            };
            if !rest.is_empty() {
                page.lines.push(rest.to_string());
            }
            current = Some(page);
        } else {
            current
                .get_or_insert_with(Page::default)
                .lines
                .push(trimmed.to_string());
        }
    }

    if let Some(page) = current.filter(|page| !page.lines.is_empty()) {
        pages.push(page);
    }

    pages
}

/// Page controls are only worth showing with more than one page.
pub fn is_paginated(pages: &[Page]) -> bool {
    pages.len() > 1
}

/// Numbers too large for `u64` saturate; the line still opens a page.
fn split_marker(line: &str) -> Option<(u64, &str)> {
    let captures = RE_PAGE_MARKER.captures(line)?;
    let number = captures[1].parse::<u64>().unwrap_or(u64::MAX);
    let consumed = captures.get(0)?.end();
    Some((number, line[consumed..].trim()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn page(number: Option<u64>, lines: &[&str]) -> Page {
        Page {
            number,
            lines: lines.iter().map(|line| line.to_string()).collect(),
        }
    }

    #[test]
    fn numbered_lines_become_pages() {
        let pages = paginate("1. Alpha\n2. Beta\n3. Gamma");
        assert_eq!(
            pages,
            vec![
                page(Some(1), &["Alpha"]),
                page(Some(2), &["Beta"]),
                page(Some(3), &["Gamma"]),
            ]
        );
        assert!(is_paginated(&pages));
    }

    #[test]
    fn unnumbered_text_is_one_page() {
        let pages = paginate("Hello\nWorld");
        assert_eq!(pages, vec![page(None, &["Hello", "World"])]);
        assert!(!is_paginated(&pages));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let pages = paginate("1. Foo\n\n\n2. Bar");
        assert_eq!(pages, vec![page(Some(1), &["Foo"]), page(Some(2), &["Bar"])]);
    }

    #[test]
    fn empty_marker_page_vanishes() {
        assert_eq!(paginate("1.\n2. Bar"), vec![page(Some(2), &["Bar"])]);
        assert_eq!(paginate("1)\n2:\n3 Baz"), vec![page(Some(3), &["Baz"])]);
        assert_eq!(paginate("1.\n2."), Vec::<Page>::new());
    }

    #[test]
    fn blank_input_yields_no_pages() {
        assert!(paginate("").is_empty());
        assert!(paginate("   \n  ").is_empty());
    }

    #[test]
    fn leading_text_and_continuation_lines() {
        let text = "  Announcements  \n1) Choir practice\n   Thursday 7pm\n2: Potluck\r\nbring a dish";
        assert_eq!(
            paginate(text),
            vec![
                page(None, &["Announcements"]),
                page(Some(1), &["Choir practice", "Thursday 7pm"]),
                page(Some(2), &["Potluck", "bring a dish"]),
            ]
        );
    }

    #[test]
    fn empty_marker_collects_following_lines() {
        assert_eq!(
            paginate("1.\nfirst\nsecond"),
            vec![page(Some(1), &["first", "second"])]
        );
    }

    #[test]
    fn sentence_leading_numbers_are_read_as_markers() {
        assert_eq!(
            paginate("3 wise men came"),
            vec![page(Some(3), &["wise men came"])]
        );
    }

    #[test]
    fn digits_without_separator_are_content() {
        assert_eq!(paginate("2024"), vec![page(None, &["2024"])]);
        assert_eq!(paginate("12abc"), vec![page(None, &["12abc"])]);
    }

    #[test]
    fn oversized_markers_still_open_a_page() {
        let text = "Intro\n99999999999999999999999. huge\n1. one";
        assert_eq!(
            paginate(text),
            vec![
                page(None, &["Intro"]),
                page(Some(u64::MAX), &["huge"]),
                page(Some(1), &["one"]),
            ]
        );
    }
}
