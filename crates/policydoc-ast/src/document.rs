//! Parsed document tree
//!
//! A [`ParsedDocument`] is the ordered list of sections assembled from the
//! classified lines of one request body. It lives for a single rendering
//! call and is never persisted.

use serde::{Deserialize, Serialize};

use crate::block::{Block, Table};

/// A parsed policy document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Sections in reading order
    pub sections: Vec<ParsedSection>,
}

/// A top-level section, started by a main header line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedSection {
    /// Header text; `None` for the implicit section holding a preamble
    /// or a document without headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body blocks that precede the first subsection
    pub blocks: Vec<Block>,
    /// Subsections in reading order
    pub subsections: Vec<ParsedSubsection>,
}

/// A subsection nested under a section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedSubsection {
    /// Header text, e.g. `1.1 Purpose`
    pub title: String,
    /// Body blocks
    pub blocks: Vec<Block>,
}

/// Join block texts with newlines
fn blocks_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::text)
        .collect::<Vec<_>>()
        .join("\n")
}

impl ParsedDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section
    pub fn push(&mut self, section: ParsedSection) {
        self.sections.push(section);
    }

    /// Check if the document has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Get the number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Full plain text of the document: section titles, bodies and
    /// subsection titles and bodies in reading order.
    pub fn text(&self) -> String {
        let mut parts = Vec::new();
        for section in &self.sections {
            if let Some(title) = &section.title {
                parts.push(title.clone());
            }
            let body = section.body_text();
            if !body.is_empty() {
                parts.push(body);
            }
            for sub in &section.subsections {
                parts.push(sub.title.clone());
                let body = sub.body_text();
                if !body.is_empty() {
                    parts.push(body);
                }
            }
        }
        parts.join("\n")
    }
}

impl ParsedSection {
    /// Create an untitled section
    pub fn untitled() -> Self {
        Self::default()
    }

    /// Create a section with a title
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Plain text of the section's own blocks (subsections excluded)
    pub fn body_text(&self) -> String {
        blocks_text(&self.blocks)
    }

    /// First table in the section's own blocks
    pub fn table(&self) -> Option<&Table> {
        self.tables().next()
    }

    /// All tables in the section's own blocks, in reading order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Whether the section has neither body blocks nor subsections
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.subsections.is_empty()
    }
}

impl ParsedSubsection {
    /// Create a subsection with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    /// Plain text of the subsection body
    pub fn body_text(&self) -> String {
        blocks_text(&self.blocks)
    }

    /// First table in the subsection
    pub fn table(&self) -> Option<&Table> {
        self.blocks.iter().find_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Paragraph;
    use crate::inline::Inline;

    fn para(text: &str) -> Block {
        Block::Paragraph(Paragraph::new(vec![Inline::text(text)]))
    }

    #[test]
    fn test_empty_document() {
        let doc = ParsedDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
        assert_eq!(doc.text(), "");
    }

    #[test]
    fn test_section_body_text() {
        let mut section = ParsedSection::with_title("1 INTRODUCTION");
        section.blocks.push(para("First paragraph."));
        section.blocks.push(para("Second paragraph."));
        assert_eq!(section.body_text(), "First paragraph.\nSecond paragraph.");
    }

    #[test]
    fn test_section_table_accessor() {
        let mut section = ParsedSection::untitled();
        section.blocks.push(para("Intro"));
        section.blocks.push(Block::Table(Table {
            headers: vec![],
            rows: vec![vec!["Owner".to_string(), "CISO".to_string()]],
        }));
        let table = section.table().expect("table present");
        assert_eq!(table.rows[0][1], "CISO");
        assert_eq!(section.tables().count(), 1);
    }

    #[test]
    fn test_document_text_order() {
        let mut section = ParsedSection::with_title("1 INTRODUCTION");
        section.blocks.push(para("Overview."));
        let mut sub = ParsedSubsection::new("1.1 Purpose");
        sub.blocks.push(para("Why."));
        section.subsections.push(sub);

        let mut doc = ParsedDocument::new();
        doc.push(section);
        assert_eq!(doc.text(), "1 INTRODUCTION\nOverview.\n1.1 Purpose\nWhy.");
    }

    #[test]
    fn test_serialize_skips_missing_title() {
        let doc = ParsedDocument {
            sections: vec![ParsedSection::untitled()],
        };
        let json = serde_json::to_string(&doc).unwrap();
        assert!(!json.contains("title"));
    }
}
