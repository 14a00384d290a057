//! HTML document renderer
//!
//! Renders a [`ParsedDocument`] into one self-contained HTML page. Every
//! piece of request or document text passes through [`html_escape`] on its
//! way into the markup.

use chrono::{DateTime, Utc};
use policydoc_ast::{Block, DocumentRequest, Inline, List, ParsedDocument, Table};
use policydoc_core::inline::parse_inlines;
use policydoc_core::sanitize::clean_text;
use policydoc_core::{parse_with, Result, Settings};
use tracing::debug;

use crate::escape::html_escape;
use crate::style::stylesheet;

/// HTML report renderer
pub struct HtmlRenderer {
    settings: Settings,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl HtmlRenderer {
    /// Create a renderer with explicit settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Parse the request body and render the complete HTML document
    pub fn render(&self, request: &DocumentRequest) -> Result<String> {
        let outcome = parse_with(&request.body_text, &self.settings)?;
        debug!(
            sections = outcome.document.len(),
            "rendering html document"
        );
        Ok(self.render_document(request, &outcome.document))
    }

    /// Render an already parsed document
    pub fn render_document(&self, request: &DocumentRequest, doc: &ParsedDocument) -> String {
        let title = self.clean(&request.title);
        let organization = self.clean(&request.organization_name);
        let policy_id = request
            .policy_id
            .as_deref()
            .map(|id| self.clean(id))
            .filter(|id| !id.trim().is_empty());

        let header_html = self.format_header(&title, &organization, policy_id.as_deref());
        let body_html = Self::format_sections(doc);
        let footer_html = Self::format_footer(&organization, request.generated_at());
        let css = stylesheet(&title);
        let page_title = html_escape(&title);

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{page_title}</title>
    <style>{css}    </style>
</head>
<body>
    <div class="no-print">
        <button type="button" onclick="window.print()">Print / Save as PDF</button>
        <button type="button" onclick="window.print()">Download PDF</button>
    </div>

{header_html}
    <main>
{body_html}    </main>

{footer_html}
</body>
</html>
"#
        )
    }

    fn clean(&self, text: &str) -> String {
        clean_text(text, self.settings.classifier.separator_min_run)
            .trim()
            .to_string()
    }

    fn format_header(&self, title: &str, organization: &str, policy_id: Option<&str>) -> String {
        let mut html = String::from("    <header class=\"document-header\">\n");
        html.push_str(&format!(
            "        <h1 class=\"document-title\">{}</h1>\n",
            html_escape(title)
        ));
        if let Some(id) = policy_id {
            html.push_str(&format!(
                "        <div class=\"policy-id\">Policy ID: {}</div>\n",
                html_escape(id)
            ));
        }
        if !organization.is_empty() {
            html.push_str(&format!(
                "        <div class=\"organization\">{}</div>\n",
                html_escape(organization)
            ));
        }
        html.push_str(&format!(
            "        <div class=\"confidentiality\">{}</div>\n",
            html_escape(&self.settings.document.confidentiality_notice)
        ));
        html.push_str("    </header>");
        html
    }

    fn format_footer(organization: &str, generated: DateTime<Utc>) -> String {
        let mut html = String::from("    <footer class=\"document-footer\">\n");
        html.push_str(&format!(
            "        <p>Generated on {}</p>\n",
            generated.format("%B %-d, %Y at %H:%M UTC")
        ));
        if !organization.is_empty() {
            html.push_str(&format!(
                "        <p>{}</p>\n",
                html_escape(organization)
            ));
        }
        html.push_str("    </footer>");
        html
    }

    fn format_sections(doc: &ParsedDocument) -> String {
        let mut html = String::new();

        for section in &doc.sections {
            html.push_str("        <section class=\"policy-section\">\n");
            if let Some(title) = &section.title {
                html.push_str(&format!("            <h2>{}</h2>\n", format_text(title)));
            }
            Self::format_blocks(&mut html, &section.blocks);

            for sub in &section.subsections {
                html.push_str("            <div class=\"subsection\">\n");
                html.push_str(&format!("            <h3>{}</h3>\n", format_text(&sub.title)));
                Self::format_blocks(&mut html, &sub.blocks);
                html.push_str("            </div>\n");
            }
            html.push_str("        </section>\n");
        }

        html
    }

    fn format_blocks(html: &mut String, blocks: &[Block]) {
        for block in blocks {
            match block {
                Block::Paragraph(para) => {
                    html.push_str(&format!(
                        "            <p>{}</p>\n",
                        format_inlines(&para.inlines)
                    ));
                }
                Block::List(list) => Self::format_list(html, list),
                Block::Table(table) => Self::format_table(html, table),
            }
        }
    }

    fn format_list(html: &mut String, list: &List) {
        if list.ordered {
            match list.items.first().and_then(|item| item.ordinal) {
                Some(start) if start != 1 => {
                    html.push_str(&format!("            <ol start=\"{}\">\n", start));
                }
                _ => html.push_str("            <ol>\n"),
            }
        } else {
            html.push_str("            <ul>\n");
        }

        for item in &list.items {
            html.push_str(&format!(
                "                <li>{}</li>\n",
                format_inlines(&item.inlines)
            ));
        }

        html.push_str(if list.ordered {
            "            </ol>\n"
        } else {
            "            </ul>\n"
        });
    }

    fn format_table(html: &mut String, table: &Table) {
        let field_value = table.is_field_value();
        let columns = table.column_count();

        if field_value {
            html.push_str("            <table class=\"field-table\">\n");
        } else {
            html.push_str("            <table>\n");
        }

        if !table.headers.is_empty() {
            html.push_str("                <thead><tr>");
            for i in 0..columns {
                let cell = table.headers.get(i).map(String::as_str).unwrap_or("");
                html.push_str(&format!("<th>{}</th>", format_text(cell)));
            }
            html.push_str("</tr></thead>\n");
        }

        html.push_str("                <tbody>\n");
        for row in &table.rows {
            html.push_str("                    <tr>");
            for i in 0..columns {
                let cell = format_text(row.get(i).map(String::as_str).unwrap_or(""));
                if field_value && i == 0 {
                    html.push_str(&format!("<th scope=\"row\">{}</th>", cell));
                } else {
                    html.push_str(&format!("<td>{}</td>", cell));
                }
            }
            html.push_str("</tr>\n");
        }
        html.push_str("                </tbody>\n");
        html.push_str("            </table>\n");
    }
}

/// Escape a heading or table cell, turning any links in it into anchors
pub fn format_text(text: &str) -> String {
    format_inlines(&parse_inlines(text))
}

/// Render inline content, turning links into escaped anchors
pub fn format_inlines(inlines: &[Inline]) -> String {
    let mut html = String::new();
    for inline in inlines {
        match inline {
            Inline::Text { text } => html.push_str(&html_escape(text)),
            Inline::Link {
                url,
                text,
                download: true,
            } => html.push_str(&format!(
                "<a href=\"{}\" download>{}</a>",
                html_escape(url),
                html_escape(text)
            )),
            Inline::Link { url, text, .. } => html.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                html_escape(url),
                html_escape(text)
            )),
        }
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use policydoc_ast::{ListItem, Paragraph, ParsedSection};

    fn request(body: &str) -> DocumentRequest {
        DocumentRequest::new("Access Control Policy", body, "Acme Health")
            .with_generated_date(Utc.with_ymd_and_hms(2025, 3, 4, 9, 30, 0).unwrap())
    }

    #[test]
    fn test_format_inlines_escapes_text() {
        let html = format_inlines(&[Inline::text("a < b & c")]);
        assert_eq!(html, "a &lt; b &amp; c");
    }

    #[test]
    fn test_format_download_link() {
        let html = format_inlines(&[Inline::download("https://example.com/f.pdf")]);
        assert_eq!(
            html,
            "<a href=\"https://example.com/f.pdf\" download>Download</a>"
        );
    }

    #[test]
    fn test_ordered_list_start() {
        let mut doc = ParsedDocument::new();
        let mut section = ParsedSection::untitled();
        section.blocks.push(Block::List(List {
            ordered: true,
            items: vec![ListItem {
                ordinal: Some(4),
                inlines: vec![Inline::text("Fourth")],
            }],
        }));
        doc.push(section);

        let html = HtmlRenderer::default().render_document(&request(""), &doc);
        assert!(html.contains("<ol start=\"4\">"));
        assert!(html.contains("<li>Fourth</li>"));
    }

    #[test]
    fn test_field_table_has_row_headers() {
        let mut doc = ParsedDocument::new();
        let mut section = ParsedSection::with_title("1 OVERVIEW");
        section.blocks.push(Block::Table(Table {
            headers: vec![],
            rows: vec![vec!["Owner".to_string(), "Privacy Officer".to_string()]],
        }));
        section
            .blocks
            .push(Block::Paragraph(Paragraph::new(vec![Inline::text("Body.")])));
        doc.push(section);

        let html = HtmlRenderer::default().render_document(&request(""), &doc);
        assert!(html.contains("<table class=\"field-table\">"));
        assert!(html.contains("<th scope=\"row\">Owner</th><td>Privacy Officer</td>"));
        assert!(html.contains("<h2>1 OVERVIEW</h2>"));
    }

    #[test]
    fn test_links_in_cells_and_headings() {
        let mut doc = ParsedDocument::new();
        let mut section = ParsedSection::with_title("1 FORMS see https://example.com/forms");
        section.blocks.push(Block::Table(Table {
            headers: vec![],
            rows: vec![vec![
                "Access Request Form".to_string(),
                "[Download: https://example.com/form.pdf]".to_string(),
            ]],
        }));
        doc.push(section);

        let html = HtmlRenderer::default().render_document(&request(""), &doc);
        assert!(html.contains(
            "<td><a href=\"https://example.com/form.pdf\" download>Download</a></td>"
        ));
        assert!(html.contains("<h2>1 FORMS see <a href=\"https://example.com/forms\""));
        assert!(!html.contains("[Download:"));
    }

    #[test]
    fn test_format_text_escapes_around_links() {
        assert_eq!(
            format_text("<b> https://example.com/a?x=1&y=2"),
            "&lt;b&gt; <a href=\"https://example.com/a?x=1&amp;y=2\" target=\"_blank\" \
             rel=\"noopener noreferrer\">https://example.com/a?x=1&amp;y=2</a>"
        );
    }

    #[test]
    fn test_footer_timestamp() {
        let html = HtmlRenderer::default().render(&request("text.")).unwrap();
        assert!(html.contains("Generated on March 4, 2025 at 09:30 UTC"));
    }

    #[test]
    fn test_blank_policy_id_is_omitted() {
        let req = request("text.").with_policy_id("   ");
        let html = HtmlRenderer::default().render(&req).unwrap();
        assert!(!html.contains("Policy ID:"));
    }
}
