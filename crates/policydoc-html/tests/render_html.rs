//! End-to-end tests for HTML output

use chrono::{TimeZone, Utc};
use policydoc_ast::DocumentRequest;
use policydoc_core::{FormatError, Settings};
use policydoc_html::{render_html, render_html_with};

const POLICY: &str = "POLICY 2: Incident Response
══════════════════════════════
Policy ID
IR-002

1 PURPOSE
{{organization_name}} responds to security incidents within {{ response_hours }} hours.
==========================

1.1 Reporting
• Report suspected incidents to the Security Officer
• Preserve evidence

2 REFERENCES
Guidance: https://www.hhs.gov/hipaa/for-professionals/breach-notification.

[Download: https://example.com/forms/incident-report.pdf]
";

fn request(body: &str) -> DocumentRequest {
    DocumentRequest::new("Incident Response Policy", body, "Acme Health")
        .with_policy_id("IR-002")
        .with_generated_date(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
}

#[test]
fn test_complete_document() {
    let html = render_html(&request(POLICY)).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<meta charset=\"UTF-8\">"));
    assert!(html.contains("<h1 class=\"document-title\">Incident Response Policy</h1>"));
    assert!(html.contains("Policy ID: IR-002"));
    assert!(html.contains("CONFIDENTIAL — Internal Use Only"));
    assert!(html.contains("<h2>1 PURPOSE</h2>"));
    assert!(html.contains("<h3>1.1 Reporting</h3>"));
    assert!(html.contains("<li>Preserve evidence</li>"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn test_print_controls_hidden_in_print() {
    let html = render_html(&request(POLICY)).unwrap();

    assert!(html.contains("Print / Save as PDF"));
    assert!(html.contains("Download PDF"));
    assert!(html.contains("window.print()"));
    assert!(html.contains("@media print"));
    assert!(html.contains(".no-print { display: none !important; }"));
}

#[test]
fn test_links_become_anchors() {
    let html = render_html(&request(POLICY)).unwrap();

    assert!(html.contains(
        "<a href=\"https://www.hhs.gov/hipaa/for-professionals/breach-notification\" target=\"_blank\" rel=\"noopener noreferrer\">"
    ));
    assert!(html.contains(
        "<a href=\"https://example.com/forms/incident-report.pdf\" download>Download</a>"
    ));
}

#[test]
fn test_no_placeholder_leakage() {
    let html = render_html(&request(POLICY)).unwrap();
    assert!(!html.contains("{{"));
    assert!(!html.contains("}}"));

    let titled = DocumentRequest::new("{{org}} Privacy Policy", "text.", "{{org}}");
    let html = render_html(&titled).unwrap();
    assert!(!html.contains("{{"));
    assert!(!html.contains("}}"));
}

#[test]
fn test_no_separator_leakage() {
    let html = render_html(&request(POLICY)).unwrap();
    assert!(!html.contains("══════════"));
    assert!(!html.contains("=========="));
    assert!(!html.contains("__________"));
}

#[test]
fn test_script_is_escaped() {
    let req = DocumentRequest::new(
        "<script>alert(1)</script>",
        "1 PURPOSE\n<script>alert(1)</script>\nClick \"here\" & 'there'",
        "<b>Org</b>",
    )
    .with_policy_id("<img src=x onerror=alert(1)>");

    let html = render_html(&req).unwrap();
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<img"));
    assert!(!html.contains("<b>Org"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains("Click &quot;here&quot; &amp; &#39;there&#39;"));
}

#[test]
fn test_pathological_inputs_render() {
    // 500 KB of deterministic pseudo-random text
    let mut state: u32 = 0x9E37_79B9;
    let alphabet = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJ0123456789 .,:-\t\n{}=\xe2";
    let random: String = (0..500 * 1024)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let byte = alphabet[(state as usize) % alphabet.len()];
            if byte == 0xe2 {
                '═'
            } else {
                byte as char
            }
        })
        .collect();

    for body in [
        String::new(),
        "══════════════════════════════\n==========".to_string(),
        "\n\n\n".to_string(),
        random,
    ] {
        let html = render_html(&request(&body)).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("</html>"));
        assert!(!html.contains("{{"));
        assert!(!html.contains("}}"));
    }
}

#[test]
fn test_divider_rebuilt_by_placeholder_removal_does_not_leak() {
    let html = render_html(&request("intro text.\n==========\n-----{{x}}-----\n")).unwrap();
    assert!(html.contains("intro text."));
    assert!(!html.contains("----------"));
    assert!(!html.contains("=========="));
}

#[test]
fn test_links_in_field_value_rows() {
    let body = "1 FORMS\n\
                Access Request Form\n\
                [Download: https://example.com/form.pdf]\n\
                Reference\n\
                https://www.hhs.gov/hipaa";
    let html = render_html(&request(body)).unwrap();

    assert!(html.contains(
        "<tr><th scope=\"row\">Access Request Form</th>\
         <td><a href=\"https://example.com/form.pdf\" download>Download</a></td></tr>"
    ));
    assert!(html.contains(
        "<td><a href=\"https://www.hhs.gov/hipaa\" target=\"_blank\" \
         rel=\"noopener noreferrer\">https://www.hhs.gov/hipaa</a></td>"
    ));
    assert!(!html.contains("[Download:"));
}

#[test]
fn test_custom_notice_and_ceiling() {
    let mut settings = Settings::default();
    settings.document.confidentiality_notice = "Internal".to_string();
    let html = render_html_with(&request("text."), &settings).unwrap();
    assert!(html.contains("<div class=\"confidentiality\">Internal</div>"));

    settings.limits.max_input_bytes = 8;
    let err = render_html_with(&request(POLICY), &settings).unwrap_err();
    assert!(matches!(err, FormatError::DocumentTooLarge { .. }));
}
