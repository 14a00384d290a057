//! Embedded stylesheet
//!
//! Print rules come first: A4 pages, running header and "Page N of M"
//! footer through `@page` margin boxes, and break avoidance on headings,
//! rows and list items. The screen rules only dress the preview.

use crate::escape::css_string_escape;

/// Build the `<style>` body for a document with the given title
pub fn stylesheet(title: &str) -> String {
    let running_title = css_string_escape(title);

    format!(
        r#"
        @page {{
            size: A4;
            margin: 2.5cm 2cm;
            @top-center {{
                content: "{running_title}";
                font-family: 'Helvetica Neue', Arial, sans-serif;
                font-size: 9pt;
                color: #6c757d;
            }}
            @bottom-center {{
                content: "Page " counter(page) " of " counter(pages);
                font-family: 'Helvetica Neue', Arial, sans-serif;
                font-size: 9pt;
                color: #6c757d;
            }}
        }}
        * {{ box-sizing: border-box; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
            font-size: 11pt;
            line-height: 1.6;
            color: #212529;
            max-width: 210mm;
            margin: 0 auto;
            padding: 2rem;
        }}
        .document-header {{
            text-align: center;
            border-bottom: 2px solid #212529;
            padding-bottom: 1rem;
            margin-bottom: 2rem;
        }}
        .document-title {{ font-size: 20pt; margin: 0 0 0.5rem 0; }}
        .policy-id {{
            font-family: 'SF Mono', Monaco, 'Courier New', monospace;
            color: #495057;
        }}
        .organization {{ font-weight: bold; color: #495057; }}
        .confidentiality {{
            display: inline-block;
            margin-top: 0.75rem;
            padding: 0.25rem 0.75rem;
            border: 1px solid #dc3545;
            color: #dc3545;
            font-size: 9pt;
            font-weight: bold;
            letter-spacing: 0.5px;
            text-transform: uppercase;
        }}
        h2 {{
            font-size: 14pt;
            border-bottom: 1px solid #dee2e6;
            padding-bottom: 0.25rem;
            margin-top: 2rem;
        }}
        h3 {{ font-size: 12pt; margin-top: 1.5rem; }}
        h1, h2, h3 {{
            page-break-after: avoid;
            break-after: avoid;
            page-break-inside: avoid;
            break-inside: avoid;
        }}
        p {{
            text-align: justify;
            orphans: 3;
            widows: 3;
        }}
        table {{
            width: 100%;
            border-collapse: collapse;
            margin: 1rem 0;
        }}
        th, td {{
            border: 1px solid #dee2e6;
            padding: 0.4rem 0.6rem;
            text-align: left;
            vertical-align: top;
        }}
        thead th {{ background: #f1f3f5; }}
        .field-table th {{ width: 35%; background: #f8f9fa; }}
        tr, li {{
            page-break-inside: avoid;
            break-inside: avoid;
        }}
        a {{ color: #0056b3; word-break: break-all; }}
        .document-footer {{
            margin-top: 3rem;
            padding-top: 1rem;
            border-top: 1px solid #dee2e6;
            color: #6c757d;
            font-size: 9pt;
            text-align: center;
        }}
        .no-print {{
            position: fixed;
            top: 1rem;
            right: 1rem;
            display: flex;
            gap: 0.5rem;
        }}
        .no-print button {{
            padding: 0.5rem 1rem;
            border: none;
            border-radius: 4px;
            background: #0056b3;
            color: white;
            font-weight: bold;
            cursor: pointer;
        }}
        @media print {{
            .no-print {{ display: none !important; }}
            body {{ padding: 0; max-width: none; }}
            a {{ color: inherit; }}
        }}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_rules() {
        let css = stylesheet("Access Control");
        assert!(css.contains("size: A4;"));
        assert!(css.contains("margin: 2.5cm 2cm;"));
        assert!(css.contains(r#"content: "Access Control";"#));
        assert!(css.contains(r#"counter(page) " of " counter(pages)"#));
        assert!(css.contains("orphans: 3;"));
        assert!(css.contains("widows: 3;"));
    }

    #[test]
    fn test_no_adjacent_braces() {
        let css = stylesheet("T");
        assert!(!css.contains("{{"));
        assert!(!css.contains("}}"));
    }

    #[test]
    fn test_title_cannot_close_style() {
        let css = stylesheet("</style><script>");
        assert!(!css.contains("</style>"));
        assert!(!css.contains("<script>"));
    }
}
