//! Inline link detection
//!
//! Finds `[Download: URL]` markers and bare `http(s)://` URLs in block text
//! and splits the text into [`Inline`] runs.

use once_cell::sync::Lazy;
use policydoc_ast::Inline;
use regex::Regex;

static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[Download:\s*(https?://[^\s\]]+)\s*\]|https?://[^\s<>"'\]]+"#)
        .expect("link regex is valid")
});

/// Characters trimmed from the end of a bare URL (sentence punctuation)
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', ')', '!', '?'];

/// Split text into text and link inlines
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut result = Vec::new();
    let mut last = 0;

    for caps in LINK_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };

        let (inline, end) = match caps.get(1) {
            Some(url) => (Inline::download(url.as_str()), whole.end()),
            None => {
                let url = whole.as_str().trim_end_matches(TRAILING_PUNCTUATION);
                if url.len() <= "https://".len() {
                    continue;
                }
                (Inline::link(url), whole.start() + url.len())
            }
        };

        if whole.start() > last {
            result.push(Inline::text(&text[last..whole.start()]));
        }
        result.push(inline);
        last = end;
    }

    if last < text.len() {
        result.push(Inline::text(&text[last..]));
    }

    if result.is_empty() {
        result.push(Inline::text(""));
    }

    result
}
