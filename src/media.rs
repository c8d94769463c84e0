//! Classifies quick-display input as paginated text, a video link or an
//! image link.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Page;
use crate::paginate::{is_paginated, paginate};

static RE_YOUTUBE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtube\.com/(?:watch\?v=|embed/)|youtu\.be/)([a-zA-Z0-9_-]{11})").unwrap()
});
static RE_VIMEO: Lazy<Regex> = Lazy::new(|| Regex::new(r"vimeo\.com/([0-9]+)").unwrap());
static RE_VIDEO_FILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(mp4|webm|ogg|mov)(\?|$)").unwrap());
static RE_IMAGE_FILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(png|jpe?g|gif|webp|svg|bmp)(\?|$)").unwrap());

/// What the quick display should show for a piece of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickContent {
    Text(Vec<Page>),
    Video { source: String, embed: String },
    Image(String),
}

impl QuickContent {
    pub fn classify(input: &str) -> Self {
        let trimmed = input.trim();
        if is_link(trimmed) {
            if let Some(embed) = video_embed_url(trimmed) {
                return QuickContent::Video {
                    source: trimmed.to_string(),
                    embed,
                };
            }
            if RE_IMAGE_FILE.is_match(trimmed) {
                return QuickContent::Image(trimmed.to_string());
            }
        }
        QuickContent::Text(paginate(input))
    }

    /// Page controls apply to multi-page text only.
    pub fn is_paginated(&self) -> bool {
        match self {
            QuickContent::Text(pages) => is_paginated(pages),
            _ => false,
        }
    }

    pub fn page_count(&self) -> usize {
        match self {
            QuickContent::Text(pages) => pages.len(),
            _ => 1,
        }
    }

    /// Link to hand to the system opener, for media entries.
    pub fn link(&self) -> Option<&str> {
        match self {
            QuickContent::Text(_) => None,
            QuickContent::Video { embed, .. } => Some(embed),
            QuickContent::Image(url) => Some(url),
        }
    }
}

fn is_link(text: &str) -> bool {
    (text.starts_with("http://") || text.starts_with("https://"))
        && !text.contains(char::is_whitespace)
}

/// Playable URL for YouTube, Vimeo or a direct video file.
pub fn video_embed_url(url: &str) -> Option<String> {
    if let Some(captures) = RE_YOUTUBE.captures(url) {
        return Some(format!(
            "https://www.youtube.com/embed/{}?autoplay=1&rel=0",
            &captures[1]
        ));
    }
    if let Some(captures) = RE_VIMEO.captures(url) {
        return Some(format!(
            "https://player.vimeo.com/video/{}?autoplay=1",
            &captures[1]
        ));
    }
    if RE_VIDEO_FILE.is_match(url) {
        return Some(url.to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn youtube_links_become_embeds() {
        assert_eq!(
            video_embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10").as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&rel=0")
        );
        assert_eq!(
            video_embed_url("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&rel=0")
        );
    }

    #[test]
    fn vimeo_and_direct_files() {
        assert_eq!(
            video_embed_url("https://vimeo.com/76979871").as_deref(),
            Some("https://player.vimeo.com/video/76979871?autoplay=1")
        );
        assert_eq!(
            video_embed_url("https://cdn.example.org/clip.MP4?sig=1").as_deref(),
            Some("https://cdn.example.org/clip.MP4?sig=1")
        );
        assert_eq!(video_embed_url("https://example.org/page"), None);
    }

    #[test]
    fn classify_links_and_text() {
        assert_eq!(
            QuickContent::classify(" https://example.org/slide.jpeg "),
            QuickContent::Image("https://example.org/slide.jpeg".to_string())
        );
        assert!(matches!(
            QuickContent::classify("https://youtu.be/dQw4w9WgXcQ"),
            QuickContent::Video { .. }
        ));

        let text = QuickContent::classify("1. Welcome\n2. Offering");
        assert!(text.is_paginated());
        assert_eq!(text.page_count(), 2);
        assert_eq!(text.link(), None);
    }

    #[test]
    fn unknown_links_are_shown_as_text() {
        let content = QuickContent::classify("https://example.org/notes");
        assert_eq!(
            content,
            QuickContent::Text(vec![Page {
                number: None,
                lines: vec!["https://example.org/notes".to_string()],
            }])
        );
        assert!(!content.is_paginated());
    }
}
