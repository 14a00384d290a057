//! Section assembler
//!
//! Folds classified lines into the [`ParsedDocument`] tree:
//!
//! - a main header opens a new section
//! - a subsection header opens a subsection in the current section
//!   (creating an untitled section if none is open)
//! - contiguous table rows form one table, contiguous list items one list,
//!   contiguous paragraph lines one paragraph (joined by single spaces)
//! - a blank line or a line of a different kind closes the open block
//!
//! Text before the first header lands in an untitled section, so non-empty
//! input without any header still yields exactly one section.

use policydoc_ast::{
    Block, List, ListItem, Paragraph, ParsedDocument, ParsedSection, ParsedSubsection, Table,
};

use crate::classifier::{ClassifiedLine, LineKind};
use crate::inline::parse_inlines;

/// Assembler state for tracking which block is being accumulated
#[derive(Debug, Clone, PartialEq)]
enum AssemblerState {
    /// Not in any block
    Root,
    /// Building a paragraph with accumulated lines
    Paragraph(Vec<String>),
    /// Building a list; `true` for ordinal items
    List(bool, Vec<ListItem>),
    /// Building a table from field/value or tab-separated rows
    Table { tabular: bool, rows: Vec<Vec<String>> },
}

/// Section assembler using a state machine approach
struct Assembler {
    sections: Vec<ParsedSection>,
    state: AssemblerState,
}

impl Assembler {
    fn new() -> Self {
        Self {
            sections: Vec::new(),
            state: AssemblerState::Root,
        }
    }

    fn assemble(mut self, lines: Vec<ClassifiedLine>) -> ParsedDocument {
        for line in lines {
            self.process_line(line.kind);
        }

        // Flush any remaining state
        self.flush_state();

        ParsedDocument {
            sections: self.sections,
        }
    }

    fn process_line(&mut self, kind: LineKind) {
        match kind {
            LineKind::Blank => self.flush_state(),
            LineKind::MainHeader { text } => {
                self.flush_state();
                self.sections.push(ParsedSection::with_title(text));
            }
            LineKind::SubsectionHeader { text } => {
                self.flush_state();
                self.current_section()
                    .subsections
                    .push(ParsedSubsection::new(text));
            }
            LineKind::FieldValueRow { cells, tabular } => self.handle_row(cells, tabular),
            LineKind::ListItem { ordinal, text } => self.handle_list_item(ordinal, &text),
            LineKind::ParagraphLine { text } => self.handle_paragraph_line(text),
        }
    }

    fn handle_row(&mut self, cells: Vec<String>, tabular: bool) {
        match &mut self.state {
            AssemblerState::Table {
                tabular: current,
                rows,
            } if *current == tabular => rows.push(cells),
            _ => {
                self.flush_state();
                self.state = AssemblerState::Table {
                    tabular,
                    rows: vec![cells],
                };
            }
        }
    }

    fn handle_list_item(&mut self, ordinal: Option<u32>, text: &str) {
        let ordered = ordinal.is_some();
        let item = ListItem {
            ordinal,
            inlines: parse_inlines(text),
        };

        match &mut self.state {
            AssemblerState::List(current, items) if *current == ordered => items.push(item),
            _ => {
                self.flush_state();
                self.state = AssemblerState::List(ordered, vec![item]);
            }
        }
    }

    fn handle_paragraph_line(&mut self, text: String) {
        match &mut self.state {
            AssemblerState::Paragraph(lines) => lines.push(text),
            _ => {
                self.flush_state();
                self.state = AssemblerState::Paragraph(vec![text]);
            }
        }
    }

    /// The open section, creating an untitled one if none exists
    fn current_section(&mut self) -> &mut ParsedSection {
        if self.sections.is_empty() {
            self.sections.push(ParsedSection::untitled());
        }
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// Block list that receives flushed blocks: the open subsection if any,
    /// otherwise the open section itself
    fn target_blocks(&mut self) -> &mut Vec<Block> {
        let section = self.current_section();
        match section.subsections.last_mut() {
            Some(sub) => &mut sub.blocks,
            None => &mut section.blocks,
        }
    }

    /// Flush the current state to a block
    fn flush_state(&mut self) {
        let state = std::mem::replace(&mut self.state, AssemblerState::Root);

        let block = match state {
            AssemblerState::Root => return,
            AssemblerState::Paragraph(lines) => {
                let text = lines.join(" ");
                if text.trim().is_empty() {
                    return;
                }
                Block::Paragraph(Paragraph::new(parse_inlines(&text)))
            }
            AssemblerState::List(ordered, items) => {
                if items.is_empty() {
                    return;
                }
                Block::List(List { ordered, items })
            }
            AssemblerState::Table { tabular, mut rows } => {
                if rows.is_empty() {
                    return;
                }
                let headers = if tabular && rows.len() >= 2 {
                    rows.remove(0)
                } else {
                    Vec::new()
                };
                Block::Table(Table { headers, rows })
            }
        };

        self.target_blocks().push(block);
    }
}

/// Assemble classified lines into a document tree
pub fn assemble(lines: Vec<ClassifiedLine>) -> ParsedDocument {
    Assembler::new().assemble(lines)
}
