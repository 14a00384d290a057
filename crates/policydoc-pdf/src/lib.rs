//! policydoc-pdf - Direct PDF generation
//!
//! Draws the parsed policy tree straight onto A4 pages with the base-14
//! Helvetica fonts. No browser or typesetting engine is involved.
//!
//! # Architecture
//!
//! The pipeline has three explicit phases:
//!
//! 1. **Layout** - [`layout::layout`] places headings, paragraphs, lists and
//!    tables onto pages with a vertical cursor and page-break checks
//! 2. **Stamp** - [`stamp::stamp`] adds "Page X of Y" footers once the page
//!    count is known
//! 3. **Write** - [`writer::write`] serializes the pages with lopdf
//!
//! # Example
//!
//! ```
//! use policydoc_ast::DocumentRequest;
//! use policydoc_pdf::render_pdf;
//!
//! let request = DocumentRequest::new(
//!     "Access Control Policy",
//!     "1 PURPOSE\nthis policy protects patient data.",
//!     "Acme Health",
//! );
//! let bytes = render_pdf(&request).unwrap();
//! assert!(bytes.starts_with(b"%PDF"));
//! ```

pub mod error;
pub mod layout;
pub mod metrics;
pub mod stamp;
pub mod text;
pub mod writer;

pub use error::{PdfError, Result};
pub use layout::{layout, Cursor, Layout, LayoutContext, Page, PageGeometry};
pub use stamp::{stamp, FinalDocument, FooterInfo};

use policydoc_ast::DocumentRequest;
use policydoc_core::{check_input_size, parse_with, Settings};
use tracing::debug;

/// PDF renderer
pub struct PdfRenderer {
    settings: Settings,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl PdfRenderer {
    /// Create a renderer with explicit settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Parse and lay out a request, returning stamped pages
    pub fn compose(&self, request: &DocumentRequest) -> Result<FinalDocument> {
        check_input_size(&request.body_text, &self.settings.limits)?;

        // Pre-parse cleaning; the layout cleans every string again
        let body = text::strip_artifacts(&request.body_text);
        let outcome = parse_with(&body, &self.settings)?;

        let ctx = LayoutContext::new(request, &self.settings);
        let pages = layout(&outcome.document, &ctx);
        debug!(
            sections = outcome.document.len(),
            pages = pages.len(),
            "laid out pdf document"
        );

        let info = FooterInfo {
            title: ctx.title.clone(),
            organization: ctx.organization.clone(),
            generated: request.generated_at(),
        };
        Ok(stamp(pages, &info, &ctx.geometry))
    }

    /// Render a request to PDF bytes
    pub fn render(&self, request: &DocumentRequest) -> Result<Vec<u8>> {
        let document = self.compose(request)?;
        let bytes = writer::write(&document, self.settings.pdf.compress)?;
        debug!(
            pages = document.page_count(),
            bytes = bytes.len(),
            "wrote pdf document"
        );
        Ok(bytes)
    }
}

/// Render a request to PDF with default settings
pub fn render_pdf(request: &DocumentRequest) -> Result<Vec<u8>> {
    PdfRenderer::default().render(request)
}

/// Render a request to PDF with explicit settings
pub fn render_pdf_with(request: &DocumentRequest, settings: &Settings) -> Result<Vec<u8>> {
    PdfRenderer::new(settings.clone()).render(request)
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }

    #[test]
    fn test_compose_empty_body() {
        let request = DocumentRequest::new("Empty Policy", "", "Acme Health");
        let document = PdfRenderer::default().compose(&request).unwrap();
        assert_eq!(document.page_count(), 1);
    }
}
