//! Text sanitization
//!
//! Generated policy text carries two kinds of noise that must never reach
//! a rendered document:
//!
//! - visual divider runs (`==========`, `──────────`, ...)
//! - unresolved `{{placeholder}}` template tokens
//!
//! Both renderers call into this module; the PDF renderer calls it a second
//! time right before drawing.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum run length for a divider to be removed
pub const DEFAULT_SEPARATOR_MIN_RUN: usize = 10;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{[^{}]*\}\}").expect("placeholder regex is valid"));

/// Whether a character can form a visual divider run
pub fn is_separator_char(ch: char) -> bool {
    matches!(ch, '=' | '-' | '_' | '*' | '~' | '—' | '–') || ('\u{2500}'..='\u{257F}').contains(&ch)
}

/// Remove every run of `min_run` or more identical separator characters.
///
/// Returns the cleaned text and the number of runs removed.
pub fn strip_separator_runs(text: &str, min_run: usize) -> (String, usize) {
    let min_run = min_run.max(2);
    let mut out = String::with_capacity(text.len());
    let mut removed = 0;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if !is_separator_char(ch) {
            out.push(ch);
            continue;
        }

        let mut run = 1;
        while chars.peek() == Some(&ch) {
            chars.next();
            run += 1;
        }

        if run >= min_run {
            removed += 1;
        } else {
            out.extend(std::iter::repeat(ch).take(run));
        }
    }

    (out, removed)
}

/// Whether the text contains a `{{...}}` placeholder token
pub fn contains_placeholder(text: &str) -> bool {
    PLACEHOLDER_RE.is_match(text)
}

/// Remove placeholder tokens and any leftover `{{` / `}}` pairs.
///
/// Returns the cleaned text and the number of complete tokens removed.
pub fn strip_placeholders(text: &str) -> (String, usize) {
    let mut removed = 0;
    let mut current = text.to_string();

    loop {
        let count = PLACEHOLDER_RE.find_iter(&current).count();
        if count == 0 {
            break;
        }
        removed += count;
        current = PLACEHOLDER_RE.replace_all(&current, "").into_owned();
    }

    // Unbalanced braces left behind, e.g. `{{name` or `a}}`. Removing one
    // pair can join braces into a new pair, so repeat until stable.
    while current.contains("{{") || current.contains("}}") {
        current = current.replace("{{", "").replace("}}", "");
    }

    (current, removed)
}

/// What [`strip_noise`] removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stripped {
    pub separator_runs: usize,
    pub placeholders: usize,
}

/// Strip separator runs and placeholders until the text stops changing.
///
/// Removing a placeholder can join two short runs into a divider
/// (`-----{{x}}-----`), so one pass of each is not enough.
pub fn strip_noise(text: &str, separator_min_run: usize) -> (String, Stripped) {
    let mut stripped = Stripped::default();
    let mut current = text.to_string();

    loop {
        let (without_runs, runs) = strip_separator_runs(&current, separator_min_run);
        let (cleaned, tokens) = strip_placeholders(&without_runs);
        stripped.separator_runs += runs;
        stripped.placeholders += tokens;

        if cleaned == current {
            return (cleaned, stripped);
        }
        current = cleaned;
    }
}

/// Convenience: strip both separator runs and placeholders from text
pub fn clean_text(text: &str, separator_min_run: usize) -> String {
    strip_noise(text, separator_min_run).0
}

/// Collapse internal whitespace runs to a single space and trim
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
