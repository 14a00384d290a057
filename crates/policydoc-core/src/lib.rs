//! policydoc-core - Policy text parsing
//!
//! Turns generated policy text into a [`ParsedDocument`] tree shared by the
//! HTML and PDF renderers.
//!
//! # Example
//!
//! ```
//! use policydoc_core::parse;
//!
//! let text = "1 INTRODUCTION\n\
//!             1.1 Purpose\n\
//!             this policy protects patient data.\n\
//!             2 SCOPE\n\
//!             all workforce members.";
//!
//! let doc = parse(text).unwrap();
//! assert_eq!(doc.len(), 2);
//! assert_eq!(doc.sections[0].subsections[0].title, "1.1 Purpose");
//! ```

pub mod assembler;
pub mod classifier;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod inline;
pub mod pipeline;
pub mod sanitize;
pub mod template;

// Re-export main types and functions
pub use classifier::{classify, ClassifiedLine, Classifier, LineKind};
pub use config::Settings;
pub use error::{FormatError, Result};
pub use pipeline::{check_input_size, parse, parse_with, ParseOutcome};
pub use policydoc_ast::ParsedDocument;
pub use template::{substitute, Variables};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
