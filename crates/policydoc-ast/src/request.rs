//! Formatting request
//!
//! The input bundle handed to both renderers. It is immutable for the
//! duration of one formatting call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File name used when the title has no usable characters
const FALLBACK_FILE_STEM: &str = "policy-document";

/// Input for one formatting call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequest {
    /// Document title, shown in the header block and running header
    pub title: String,
    /// Raw generated policy text
    pub body_text: String,
    /// Organization the policy belongs to
    pub organization_name: String,
    /// Optional policy identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
    /// Generation timestamp; the renderers use the current time when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_date: Option<DateTime<Utc>>,
}

impl DocumentRequest {
    /// Create a request with the required fields
    pub fn new(
        title: impl Into<String>,
        body_text: impl Into<String>,
        organization_name: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body_text: body_text.into(),
            organization_name: organization_name.into(),
            policy_id: None,
            generated_date: None,
        }
    }

    /// Set the policy identifier
    pub fn with_policy_id(mut self, policy_id: impl Into<String>) -> Self {
        self.policy_id = Some(policy_id.into());
        self
    }

    /// Set the generation timestamp
    pub fn with_generated_date(mut self, date: DateTime<Utc>) -> Self {
        self.generated_date = Some(date);
        self
    }

    /// The generation timestamp, falling back to now
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_date.unwrap_or_else(Utc::now)
    }

    /// Download file name for the PDF rendition: `<slug>.pdf`
    pub fn pdf_file_name(&self) -> String {
        format!("{}.pdf", self.file_stem())
    }

    /// Download file name for the HTML rendition: `<slug>.html`
    pub fn html_file_name(&self) -> String {
        format!("{}.html", self.file_stem())
    }

    /// Lowercase ASCII slug of the title, dash separated
    fn file_stem(&self) -> String {
        let mut stem = String::new();
        let mut pending_dash = false;
        for ch in self.title.chars() {
            if ch.is_ascii_alphanumeric() {
                if pending_dash && !stem.is_empty() {
                    stem.push('-');
                }
                pending_dash = false;
                stem.push(ch.to_ascii_lowercase());
            } else {
                pending_dash = true;
            }
        }

        if stem.is_empty() {
            FALLBACK_FILE_STEM.to_string()
        } else {
            stem
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_request() {
        let req = DocumentRequest::new("Access Control Policy", "body", "Acme Health");
        assert_eq!(req.title, "Access Control Policy");
        assert!(req.policy_id.is_none());
        assert!(req.generated_date.is_none());
    }

    #[test]
    fn test_pdf_file_name() {
        let req = DocumentRequest::new("HIPAA Security: Access Control (v2)", "", "Acme");
        assert_eq!(req.pdf_file_name(), "hipaa-security-access-control-v2.pdf");
    }

    #[test]
    fn test_file_name_fallback() {
        let req = DocumentRequest::new("═══", "", "Acme");
        assert_eq!(req.pdf_file_name(), "policy-document.pdf");
        assert_eq!(req.html_file_name(), "policy-document.html");
    }

    #[test]
    fn test_generated_at_uses_given_date() {
        let date = Utc.with_ymd_and_hms(2025, 1, 1, 9, 30, 0).unwrap();
        let req = DocumentRequest::new("T", "", "O").with_generated_date(date);
        assert_eq!(req.generated_at(), date);
    }

    #[test]
    fn test_serde_roundtrip_optional_fields() {
        let req = DocumentRequest::new("T", "B", "O").with_policy_id("POL-001");
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"policy_id\":\"POL-001\""));
        assert!(!json.contains("generated_date"));
        let back: DocumentRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, req);
    }
}
