//! Block-level elements for section bodies
//!
//! A section body is an ordered run of paragraphs, lists and field/value
//! tables, in the order they appeared in the source text.

use serde::{Deserialize, Serialize};

use crate::inline::{inlines_to_text, Inline};

/// Block-level content element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),
    /// An ordered or unordered list
    List(List),
    /// A field/value or tab-separated table
    Table(Table),
}

/// A paragraph block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline content within the paragraph
    pub inlines: Vec<Inline>,
}

/// A list (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Whether items carried `N.` ordinal markers
    pub ordered: bool,
    /// List items
    pub items: Vec<ListItem>,
}

/// A single list item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// The ordinal from the source (`3` for `3. Item`), if any
    pub ordinal: Option<u32>,
    /// Item content
    pub inlines: Vec<Inline>,
}

/// A table
///
/// Field/value tables have no headers; every row is `[field, value]`.
/// Tab-separated runs of two or more lines use their first line as headers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Column headers (may be empty)
    pub headers: Vec<String>,
    /// Table rows
    pub rows: Vec<Vec<String>>,
}

impl Paragraph {
    /// Create a paragraph from inlines
    pub fn new(inlines: Vec<Inline>) -> Self {
        Self { inlines }
    }

    /// Plain text of the paragraph
    pub fn text(&self) -> String {
        inlines_to_text(&self.inlines)
    }
}

impl ListItem {
    /// Plain text of the item, without its marker
    pub fn text(&self) -> String {
        inlines_to_text(&self.inlines)
    }
}

impl Table {
    /// Number of columns, taking the widest of headers and rows
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether this is a header-less two-column field/value table
    pub fn is_field_value(&self) -> bool {
        self.headers.is_empty() && self.column_count() == 2
    }
}

impl Block {
    /// Plain text of the block.
    ///
    /// Tables flatten to one line per row with cells separated by a space,
    /// so no cell content is lost when a section is reduced to text.
    pub fn text(&self) -> String {
        match self {
            Block::Paragraph(p) => p.text(),
            Block::List(list) => list
                .items
                .iter()
                .map(ListItem::text)
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Table(table) => {
                let mut lines = Vec::new();
                if !table.headers.is_empty() {
                    lines.push(table.headers.join(" "));
                }
                for row in &table.rows {
                    lines.push(row.join(" "));
                }
                lines.join("\n")
            }
        }
    }
}
