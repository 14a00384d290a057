//! Error types for document formatting

use thiserror::Error;

/// Result type for formatting operations
pub type Result<T> = std::result::Result<T, FormatError>;

/// Errors that can occur before or around parsing.
///
/// Malformed text is never an error; only limits and configuration are.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Body text exceeds the configured ceiling
    #[error("document too large: {size} bytes exceeds the {limit} byte limit")]
    DocumentTooLarge { size: usize, limit: usize },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {path}: {message}")]
    Config { path: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_large_message() {
        let err = FormatError::DocumentTooLarge {
            size: 3000,
            limit: 2048,
        };
        assert_eq!(
            err.to_string(),
            "document too large: 3000 bytes exceeds the 2048 byte limit"
        );
    }
}
