//! policydoc-wasm - WebAssembly bindings for policydoc
//!
//! Browser entry points for the two renderers. HTML comes back as a string
//! for a print window; PDF comes back as a `Uint8Array` that the page wraps
//! in a `Blob`, turns into an object URL and downloads under
//! [`pdf_file_name`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use policydoc_ast::{DocumentRequest, ParsedDocument};
use policydoc_core::diagnostics::Diagnostics;
use policydoc_core::{parse_with, Settings};

/// Parse result handed to JavaScript
#[derive(Serialize)]
struct ParseReport {
    document: ParsedDocument,
    diagnostics: Diagnostics,
}

/// Returns the current version of policydoc
#[wasm_bindgen]
pub fn version() -> String {
    policydoc_core::VERSION.to_string()
}

fn build_request(
    title: &str,
    body_text: &str,
    organization_name: &str,
    policy_id: Option<String>,
    generated_date: Option<String>,
) -> Result<DocumentRequest, String> {
    let mut request = DocumentRequest::new(title, body_text, organization_name);
    if let Some(id) = policy_id {
        request = request.with_policy_id(id);
    }
    if let Some(date) = generated_date {
        let parsed = DateTime::parse_from_rfc3339(&date)
            .map_err(|e| format!("invalid generated date '{}': {}", date, e))?;
        request = request.with_generated_date(parsed.with_timezone(&Utc));
    }
    Ok(request)
}

/// Format policy text as a print-ready HTML page
#[wasm_bindgen(js_name = formatHtml)]
pub fn format_html(
    title: &str,
    body_text: &str,
    organization_name: &str,
    policy_id: Option<String>,
    generated_date: Option<String>,
) -> Result<String, JsError> {
    let request = build_request(title, body_text, organization_name, policy_id, generated_date)
        .map_err(|e| JsError::new(&e))?;
    policydoc_html::render_html(&request).map_err(|e| JsError::new(&e.to_string()))
}

/// Format policy text as PDF bytes
#[wasm_bindgen(js_name = generatePdf)]
pub fn generate_pdf(
    title: &str,
    body_text: &str,
    organization_name: &str,
    policy_id: Option<String>,
    generated_date: Option<String>,
) -> Result<Vec<u8>, JsError> {
    let request = build_request(title, body_text, organization_name, policy_id, generated_date)
        .map_err(|e| JsError::new(&e))?;
    policydoc_pdf::render_pdf(&request).map_err(|e| JsError::new(&e.to_string()))
}

/// Download file name for a PDF with the given title
#[wasm_bindgen(js_name = pdfFileName)]
pub fn pdf_file_name(title: &str) -> String {
    DocumentRequest::new(title, "", "").pdf_file_name()
}

/// Parse policy text into `{ document, diagnostics }`
#[wasm_bindgen]
pub fn parse(input: &str) -> Result<JsValue, JsError> {
    let outcome =
        parse_with(input, &Settings::default()).map_err(|e| JsError::new(&e.to_string()))?;
    let report = ParseReport {
        document: outcome.document,
        diagnostics: outcome.diagnostics,
    };
    serde_wasm_bindgen::to_value(&report).map_err(|e| JsError::new(&e.to_string()))
}
