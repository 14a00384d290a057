//! policydoc CLI - Command-line interface library
//!
//! This library provides the CLI functionality for policydoc:
//! - Html: Format policy text as a print-ready HTML page
//! - Pdf: Format policy text as a paginated PDF
//! - Parse: Show the section tree and the anomalies removed from the input
//!
//! # Library Usage
//!
//! ```ignore
//! use policydoc_cli::{html_command, DocumentArgs, OutputFormat};
//!
//! let written = html_command(&args, &settings, &variables)?;
//! parse_command(&input, OutputFormat::Json, &settings, &variables)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Print-ready HTML
//! policydoc html policy.txt --title "Access Control Policy" --org "Acme Health"
//!
//! # PDF with organization values filled in
//! policydoc pdf policy.txt --title "Access Control Policy" --org "Acme Health" \
//!     --var organization_name="Acme Health" -o access-control.pdf
//!
//! # Inspect the parsed structure
//! policydoc parse policy.txt --format json
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{
    build_request, html_command, load_settings, load_variables, parse_command, pdf_command,
    render_outline,
};
pub use app::{run_cli, DocumentArgs, OutputFormat};
