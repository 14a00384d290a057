//! policydoc-ast - Parsed document tree definitions
//!
//! This crate provides the types shared by the policydoc parser and its
//! renderers: the incoming [`DocumentRequest`] and the [`ParsedDocument`]
//! tree the classifier and assembler produce from the request body.

pub mod block;
pub mod document;
pub mod inline;
pub mod request;

pub use block::{Block, List, ListItem, Paragraph, Table};
pub use document::{ParsedDocument, ParsedSection, ParsedSubsection};
pub use inline::{inlines_to_text, Inline};
pub use request::DocumentRequest;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
