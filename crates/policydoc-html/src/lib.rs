//! policydoc-html - Print-ready HTML output
//!
//! Produces a complete `<!DOCTYPE html>` document with an embedded print
//! stylesheet. Opening it in a browser and choosing "Print / Save as PDF"
//! yields paginated A4 output with a running title and page numbers.
//!
//! # Example
//!
//! ```
//! use policydoc_ast::DocumentRequest;
//! use policydoc_html::render_html;
//!
//! let request = DocumentRequest::new(
//!     "Access Control Policy",
//!     "1 PURPOSE\nthis policy protects <patient> data.",
//!     "Acme Health",
//! );
//! let html = render_html(&request).unwrap();
//! assert!(html.starts_with("<!DOCTYPE html>"));
//! assert!(html.contains("&lt;patient&gt;"));
//! ```

pub mod escape;
pub mod renderer;
pub mod style;

pub use escape::html_escape;
pub use renderer::{format_inlines, format_text, HtmlRenderer};

use policydoc_ast::DocumentRequest;
use policydoc_core::{Result, Settings};

/// Render a request to HTML with default settings
pub fn render_html(request: &DocumentRequest) -> Result<String> {
    HtmlRenderer::default().render(request)
}

/// Render a request to HTML with explicit settings
pub fn render_html_with(request: &DocumentRequest, settings: &Settings) -> Result<String> {
    HtmlRenderer::new(settings.clone()).render(request)
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
