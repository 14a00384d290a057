//! Footer stamping
//!
//! Second phase of PDF generation. The page count is only known after
//! layout, so the "Page X of Y" footers are added here, together with the
//! organization name on the left and the generation date on the right.

use chrono::{DateTime, Utc};

use crate::layout::{truncate_to_width, DrawOp, Page, PageGeometry, TextRole, TextRun, TextStyle};

/// Document-level values shown in footers and the PDF info dictionary
#[derive(Debug, Clone, PartialEq)]
pub struct FooterInfo {
    pub title: String,
    pub organization: String,
    pub generated: DateTime<Utc>,
}

impl FooterInfo {
    /// Footer rendition of the generation date
    pub fn date_label(&self) -> String {
        self.generated.format("%B %-d, %Y").to_string()
    }
}

/// Pages with footers, ready for serialization
#[derive(Debug, Clone, PartialEq)]
pub struct FinalDocument {
    pub pages: Vec<Page>,
    pub info: FooterInfo,
}

impl FinalDocument {
    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Stamp every page with its footer
pub fn stamp(mut pages: Vec<Page>, info: &FooterInfo, geometry: &PageGeometry) -> FinalDocument {
    let style = TextStyle::CHROME;
    let total = pages.len();
    let baseline = geometry.footer_baseline();
    let left = geometry.content_left();
    let right = left + geometry.content_width();
    let third = geometry.content_width() / 3.0;

    let organization = truncate_to_width(&info.organization, style.font, style.size, third);
    let date = info.date_label();
    let date_width = style.font.text_width(&date, style.size);

    for (idx, page) in pages.iter_mut().enumerate() {
        let label = format!("Page {} of {}", idx + 1, total);
        let label_width = style.font.text_width(&label, style.size);

        page.push(DrawOp::Line {
            x1: left,
            y1: baseline - 12.0,
            x2: right,
            y2: baseline - 12.0,
            gray: 0.75,
        });
        if !organization.is_empty() {
            page.push(footer_run(left, baseline, organization.clone()));
        }
        page.push(footer_run(
            left + (geometry.content_width() - label_width) / 2.0,
            baseline,
            label,
        ));
        page.push(footer_run(right - date_width, baseline, date.clone()));
    }

    FinalDocument {
        pages,
        info: info.clone(),
    }
}

fn footer_run(x: f32, y: f32, text: String) -> DrawOp {
    DrawOp::Text(TextRun {
        x,
        y,
        style: TextStyle::CHROME,
        word_spacing: 0.0,
        text,
        role: TextRole::Chrome,
    })
}
