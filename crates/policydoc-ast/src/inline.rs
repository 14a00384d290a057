//! Inline elements for block content
//!
//! Policy text is plain prose, so the only inline markup is a hyperlink.
//! Links come either from bare `http(s)://` URLs or from the
//! `[Download: URL]` marker emitted by the policy generator.

use serde::{Deserialize, Serialize};

/// Inline-level content element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// Plain text content
    Text { text: String },
    /// A hyperlink
    Link {
        /// The URL target
        url: String,
        /// Display text
        text: String,
        /// Whether the link came from a `[Download: URL]` marker
        download: bool,
    },
}

impl Inline {
    /// Create a text inline
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text { text: text.into() }
    }

    /// Create a regular link whose text is the URL itself
    pub fn link(url: impl Into<String>) -> Self {
        let url = url.into();
        Inline::Link {
            text: url.clone(),
            url,
            download: false,
        }
    }

    /// Create a download link
    pub fn download(url: impl Into<String>) -> Self {
        Inline::Link {
            url: url.into(),
            text: "Download".to_string(),
            download: true,
        }
    }

    /// Plain-text rendition of this inline.
    ///
    /// Download links keep their URL visible (`Download: URL`) so the text
    /// form never loses the target.
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text { text } => text.clone(),
            Inline::Link {
                url,
                download: true,
                ..
            } => format!("Download: {}", url),
            Inline::Link { url, .. } => url.clone(),
        }
    }
}

/// Concatenate inlines into plain text
pub fn inlines_to_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::plain_text).collect()
}
