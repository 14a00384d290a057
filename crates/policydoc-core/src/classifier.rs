//! Line classifier
//!
//! Turns raw policy text into an ordered sequence of typed lines. Each line
//! is cleaned first (separator runs, then placeholder tokens) and then
//! tested against these rules, first match wins:
//!
//! 1. `^\d+\s+[A-Z]` (not `^\d+\.\d+`) or `^POLICY\s+\d+:` → main header
//! 2. `^\d+\.\d+\s+[A-Z]` → subsection header
//! 3. two or more tab-separated cells → table row
//! 4. short capitalized (or placeholder-bearing) line followed by a short
//!    value-shaped line → field/value table row, consuming both lines
//! 5. `•`, `-`, `*` or `N.` marker → list item
//! 6. any other non-empty line → paragraph line
//! 7. empty line → blank
//!
//! The field/value rule is a heuristic and will also pair up two short
//! prose lines. Every pairing is reported as an info diagnostic.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ClassifierSettings;
use crate::diagnostics::{
    Diagnostic, Diagnostics, CODE_FIELD_VALUE, CODE_PLACEHOLDER, CODE_SEPARATOR,
};
use crate::sanitize::{contains_placeholder, strip_noise};

static MAIN_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\s+[A-Z]").expect("main header regex is valid"));
static POLICY_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^POLICY\s+\d+:").expect("policy header regex is valid"));
static DOTTED_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+").expect("dotted number regex is valid"));
static SUBSECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+\s+[A-Z]").expect("subsection regex is valid"));
static VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[A-Za-z0-9@.\-()/:{}\[\]"\s]+$"#).expect("value regex is valid")
});
static ORDINAL_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.\s+(.+)$").expect("ordinal item regex is valid"));
static BULLET_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*]\s+|•\s*)(.+)$").expect("bullet item regex is valid"));

/// Kind and payload of a classified line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineKind {
    /// Starts a new section
    MainHeader { text: String },
    /// Starts a new subsection
    SubsectionHeader { text: String },
    /// One table row: `[field, value]` or tab-separated cells
    FieldValueRow {
        cells: Vec<String>,
        /// Whether the row came from a tab-separated line
        tabular: bool,
    },
    /// A list item, marker removed
    ListItem { ordinal: Option<u32>, text: String },
    /// A line of running prose
    ParagraphLine { text: String },
    /// An empty line (also what a pure divider line becomes)
    Blank,
}

/// A classified line with its 1-indexed source line number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    /// Source line number; for field/value rows, the field line
    pub line: usize,
    /// Line kind and content
    #[serde(flatten)]
    pub kind: LineKind,
}

impl ClassifiedLine {
    /// Textual content of the line. Table cells are joined by a space.
    pub fn content(&self) -> String {
        match &self.kind {
            LineKind::MainHeader { text }
            | LineKind::SubsectionHeader { text }
            | LineKind::ListItem { text, .. }
            | LineKind::ParagraphLine { text } => text.clone(),
            LineKind::FieldValueRow { cells, .. } => cells.join(" "),
            LineKind::Blank => String::new(),
        }
    }

    /// Short name of the line kind, e.g. `main_header`
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            LineKind::MainHeader { .. } => "main_header",
            LineKind::SubsectionHeader { .. } => "subsection_header",
            LineKind::FieldValueRow { .. } => "field_value_row",
            LineKind::ListItem { .. } => "list_item",
            LineKind::ParagraphLine { .. } => "paragraph_line",
            LineKind::Blank => "blank",
        }
    }
}

/// A source line after cleaning
struct PreparedLine {
    number: usize,
    had_placeholder: bool,
    text: String,
}

/// Line classifier
pub struct Classifier<'a> {
    settings: &'a ClassifierSettings,
}

impl<'a> Classifier<'a> {
    /// Create a classifier with the given thresholds
    pub fn new(settings: &'a ClassifierSettings) -> Self {
        Self { settings }
    }

    /// Classify every line of `text`, recording removed anomalies
    pub fn classify(&self, text: &str, diagnostics: &mut Diagnostics) -> Vec<ClassifiedLine> {
        let prepared = self.prepare(text, diagnostics);
        let mut lines = Vec::with_capacity(prepared.len());
        let mut i = 0;

        while i < prepared.len() {
            let current = &prepared[i];
            let number = current.number;
            let text = current.text.as_str();

            let kind = if text.is_empty() {
                LineKind::Blank
            } else if is_main_header(text) {
                LineKind::MainHeader {
                    text: text.to_string(),
                }
            } else if SUBSECTION_RE.is_match(text) {
                LineKind::SubsectionHeader {
                    text: text.to_string(),
                }
            } else if let Some(cells) = tab_cells(text) {
                LineKind::FieldValueRow {
                    cells,
                    tabular: true,
                }
            } else if let Some(value) = self.field_value_pair(current, prepared.get(i + 1)) {
                diagnostics.push(
                    Diagnostic::info(format!(
                        "Lines {} and {} read as a field/value table row",
                        number,
                        number + 1
                    ))
                    .with_code(CODE_FIELD_VALUE)
                    .with_line(number),
                );
                lines.push(ClassifiedLine {
                    line: number,
                    kind: LineKind::FieldValueRow {
                        cells: vec![text.to_string(), value],
                        tabular: false,
                    },
                });
                i += 2;
                continue;
            } else if let Some((ordinal, item)) = list_item(text) {
                LineKind::ListItem {
                    ordinal,
                    text: item,
                }
            } else {
                LineKind::ParagraphLine {
                    text: text.to_string(),
                }
            };

            lines.push(ClassifiedLine { line: number, kind });
            i += 1;
        }

        lines
    }

    /// Clean every source line and record what was removed
    fn prepare(&self, text: &str, diagnostics: &mut Diagnostics) -> Vec<PreparedLine> {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let mut separators = 0;
        let mut placeholders = 0;

        let prepared = normalized
            .split('\n')
            .enumerate()
            .map(|(idx, raw)| {
                let number = idx + 1;
                let had_placeholder = contains_placeholder(raw);

                let (cleaned, stripped) = strip_noise(raw, self.settings.separator_min_run);
                if stripped.separator_runs > 0 {
                    separators += stripped.separator_runs;
                    diagnostics.push(
                        Diagnostic::warning("Separator run removed")
                            .with_code(CODE_SEPARATOR)
                            .with_line(number),
                    );
                }
                if stripped.placeholders > 0 {
                    placeholders += stripped.placeholders;
                    diagnostics.push(
                        Diagnostic::warning(format!(
                            "{} unresolved placeholder(s) removed",
                            stripped.placeholders
                        ))
                        .with_code(CODE_PLACEHOLDER)
                        .with_line(number)
                        .with_help("Placeholders should be substituted before formatting"),
                    );
                }

                PreparedLine {
                    number,
                    had_placeholder,
                    text: cleaned.trim().to_string(),
                }
            })
            .collect::<Vec<_>>();

        if placeholders > 0 {
            warn!(count = placeholders, "stripped unresolved placeholders");
        }
        if separators > 0 {
            debug!(count = separators, "removed separator runs");
        }

        prepared
    }

    /// If `current` is a field line and `next` its value, return the value
    fn field_value_pair(
        &self,
        current: &PreparedLine,
        next: Option<&PreparedLine>,
    ) -> Option<String> {
        let next = next?;
        let field = current.text.as_str();
        let value = next.text.as_str();

        let field_shaped = field.chars().count() < self.settings.field_max_chars
            && (field.chars().next().is_some_and(char::is_uppercase) || current.had_placeholder)
            && list_item(field).is_none();
        if !field_shaped {
            return None;
        }

        let value_shaped = !value.is_empty()
            && value.chars().count() < self.settings.value_max_chars
            && VALUE_RE.is_match(value)
            && !is_main_header(value)
            && !SUBSECTION_RE.is_match(value)
            && list_item(value).is_none();

        value_shaped.then(|| value.to_string())
    }
}

/// Classify text with default thresholds, discarding diagnostics
pub fn classify(text: &str) -> Vec<ClassifiedLine> {
    let settings = ClassifierSettings::default();
    let mut diagnostics = Diagnostics::new();
    Classifier::new(&settings).classify(text, &mut diagnostics)
}

fn is_main_header(text: &str) -> bool {
    (MAIN_HEADER_RE.is_match(text) && !DOTTED_NUMBER_RE.is_match(text))
        || POLICY_HEADER_RE.is_match(text)
}

/// Cells of a tab-separated line with at least two non-empty cells
fn tab_cells(text: &str) -> Option<Vec<String>> {
    if !text.contains('\t') {
        return None;
    }
    let cells: Vec<String> = text
        .split('\t')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    (cells.len() >= 2).then_some(cells)
}

/// Parse a list marker, returning the ordinal (for `N.` items) and the text
fn list_item(text: &str) -> Option<(Option<u32>, String)> {
    if let Some(caps) = ORDINAL_ITEM_RE.captures(text) {
        let ordinal = caps[1].parse::<u32>().ok();
        return Some((ordinal, caps[2].trim().to_string()));
    }
    BULLET_ITEM_RE
        .captures(text)
        .map(|caps| (None, caps[1].trim().to_string()))
}
