//! Configuration
//!
//! Settings are loaded from `policydoc.toml`:
//!
//! ```toml
//! [limits]
//! max_input_bytes = 2097152
//!
//! [classifier]
//! field_max_chars = 80
//! value_max_chars = 200
//! separator_min_run = 10
//!
//! [document]
//! confidentiality_notice = "CONFIDENTIAL — Internal Use Only"
//!
//! [pdf]
//! compress = true
//! margin_mm = 20.0
//! footer_band_mm = 20.0
//! ```
//!
//! Every section and field is optional; missing values use the defaults.

mod settings;

#[cfg(test)]
mod tests;

pub use settings::{
    ClassifierSettings, DocumentSettings, LimitSettings, PdfSettings, Settings,
    DEFAULT_CONFIDENTIALITY_NOTICE, DEFAULT_MAX_INPUT_BYTES,
};
