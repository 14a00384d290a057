//! Error types for PDF generation

use policydoc_core::FormatError;
use thiserror::Error;

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Errors that can occur during PDF generation
#[derive(Error, Debug)]
pub enum PdfError {
    /// The request was rejected before layout
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The PDF object graph could not be serialized
    #[error("PDF serialization failed: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_is_transparent() {
        let err: PdfError = FormatError::DocumentTooLarge { size: 10, limit: 5 }.into();
        assert_eq!(
            err.to_string(),
            "document too large: 10 bytes exceeds the 5 byte limit"
        );
    }
}
