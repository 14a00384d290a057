//! Pre-draw text cleaning and WinAnsi encoding
//!
//! The base-14 fonts only cover the WinAnsi code page. Box-drawing
//! characters fed through a single-byte font come out as a `%P` pair per
//! glyph, so a divider turns into `%P%P%P...` on the page. Every string is
//! cleaned here immediately before it is measured or drawn, even though
//! the parser already stripped dividers and placeholders once.

use once_cell::sync::Lazy;
use policydoc_core::sanitize::strip_noise;
use regex::Regex;

static ARTIFACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:%P){2,}").expect("artifact regex is valid"));

/// Remove `%P` runs left behind by mis-encoded box-drawing characters
pub fn strip_artifacts(text: &str) -> String {
    ARTIFACT_RE.replace_all(text, "").into_owned()
}

/// Box drawing (U+2500..U+257F) and block elements (U+2580..U+259F)
fn is_box_drawing(ch: char) -> bool {
    ('\u{2500}'..='\u{259F}').contains(&ch)
}

/// Clean one string for drawing.
///
/// Every removal can join its neighbours into something new (two short
/// runs around a box-drawing glyph, two braces around an artifact), so the
/// passes repeat until the text is stable.
pub fn clean_for_draw(text: &str, separator_min_run: usize) -> String {
    let mut current = strip_artifacts(text);

    loop {
        let (text, _) = strip_noise(&current, separator_min_run);
        let text: String = text.chars().filter(|&c| !is_box_drawing(c)).collect();
        let text = strip_artifacts(&text);

        if text == current {
            return text;
        }
        current = text;
    }
}

/// Map a character to its WinAnsi byte, if it has one
pub fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match ch {
        ' '..='~' => Some(code as u8),
        '\t' | '\u{00A0}' | '\u{2000}'..='\u{200A}' | '\u{202F}' => Some(b' '),
        '\u{20AC}' => Some(0x80),
        '\u{201A}' => Some(0x82),
        '\u{0192}' => Some(0x83),
        '\u{201E}' => Some(0x84),
        '\u{2026}' => Some(0x85),
        '\u{2020}' => Some(0x86),
        '\u{2021}' => Some(0x87),
        '\u{02C6}' => Some(0x88),
        '\u{2030}' => Some(0x89),
        '\u{0160}' => Some(0x8A),
        '\u{2039}' => Some(0x8B),
        '\u{0152}' => Some(0x8C),
        '\u{017D}' => Some(0x8E),
        '\u{2018}' => Some(0x91),
        '\u{2019}' => Some(0x92),
        '\u{201C}' => Some(0x93),
        '\u{201D}' => Some(0x94),
        '\u{2022}' | '\u{25CF}' | '\u{25AA}' | '\u{25E6}' => Some(0x95),
        '\u{2013}' => Some(0x96),
        '\u{2014}' => Some(0x97),
        '\u{02DC}' => Some(0x98),
        '\u{2122}' => Some(0x99),
        '\u{0161}' => Some(0x9A),
        '\u{203A}' => Some(0x9B),
        '\u{0153}' => Some(0x9C),
        '\u{017E}' => Some(0x9E),
        '\u{0178}' => Some(0x9F),
        '\u{00A1}'..='\u{00FF}' => Some(code as u8),
        _ => None,
    }
}

/// Encode text as WinAnsi bytes.
///
/// Control characters are dropped; anything else outside the code page
/// becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .filter_map(|ch| match win_ansi_byte(ch) {
            Some(byte) => Some(byte),
            None if ch.is_control() => None,
            None => Some(b'?'),
        })
        .collect()
}
