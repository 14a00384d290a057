//! Parse entry points
//!
//! Checks the input ceiling, classifies and assembles. Both renderers go
//! through [`parse_with`] so they always see the same tree for the same text.

use policydoc_ast::ParsedDocument;
use tracing::debug;

use crate::assembler::assemble;
use crate::classifier::Classifier;
use crate::config::{LimitSettings, Settings};
use crate::diagnostics::Diagnostics;
use crate::error::{FormatError, Result};

/// A parsed document together with the anomalies found while parsing
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    /// The assembled tree
    pub document: ParsedDocument,
    /// Removed placeholders, separator runs and heuristic decisions
    pub diagnostics: Diagnostics,
}

/// Reject input above the configured ceiling before any parsing happens
pub fn check_input_size(text: &str, limits: &LimitSettings) -> Result<()> {
    if text.len() > limits.max_input_bytes {
        return Err(FormatError::DocumentTooLarge {
            size: text.len(),
            limit: limits.max_input_bytes,
        });
    }
    Ok(())
}

/// Parse policy text with explicit settings
pub fn parse_with(text: &str, settings: &Settings) -> Result<ParseOutcome> {
    check_input_size(text, &settings.limits)?;

    let mut diagnostics = Diagnostics::new();
    let lines = Classifier::new(&settings.classifier).classify(text, &mut diagnostics);
    let document = assemble(lines);

    debug!(
        sections = document.len(),
        anomalies = diagnostics.len(),
        "parsed policy text"
    );

    Ok(ParseOutcome {
        document,
        diagnostics,
    })
}

/// Parse policy text with default settings.
///
/// # Errors
///
/// Fails only when the text exceeds the default input ceiling. Malformed
/// text never fails; at worst it becomes a single paragraph.
pub fn parse(text: &str) -> Result<ParsedDocument> {
    parse_with(text, &Settings::default()).map(|outcome| outcome.document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let doc = parse("1 INTRODUCTION\nhello.").unwrap();
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_too_large_fails_fast() {
        let mut settings = Settings::default();
        settings.limits.max_input_bytes = 16;
        let err = parse_with("this text is longer than sixteen bytes", &settings).unwrap_err();
        assert!(matches!(
            err,
            FormatError::DocumentTooLarge { limit: 16, .. }
        ));
    }

    #[test]
    fn test_limit_is_inclusive() {
        let limits = LimitSettings { max_input_bytes: 4 };
        assert!(check_input_size("abcd", &limits).is_ok());
        assert!(check_input_size("abcde", &limits).is_err());
    }
}
