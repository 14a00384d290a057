//! PDF serialization
//!
//! Last phase: turns a [`FinalDocument`] into PDF bytes with lopdf. The
//! whole file is built in memory, so a failure never leaves a partial
//! document behind.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use crate::error::{PdfError, Result};
use crate::layout::{DrawOp, Page, TextRun};
use crate::metrics::Font;
use crate::stamp::FinalDocument;
use crate::text::encode_win_ansi;

const LINE_WIDTH: f32 = 0.5;

/// Serialize a stamped document
pub fn write(doc: &FinalDocument, compress: bool) -> Result<Vec<u8>> {
    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let mut fonts = Dictionary::new();
    for font in [Font::Regular, Font::Bold] {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = pdf.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let content = page_content(page);
        let encoded = content
            .encode()
            .map_err(|e| PdfError::Serialization(e.to_string()))?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                real(page.width),
                real(page.height),
            ],
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let info_id = pdf.add_object(dictionary! {
        "Title" => text_string(&doc.info.title),
        "Author" => text_string(&doc.info.organization),
        "Producer" => text_string(concat!("policydoc ", env!("CARGO_PKG_VERSION"))),
        "CreationDate" => Object::string_literal(
            doc.info.generated.format("D:%Y%m%d%H%M%SZ").to_string(),
        ),
    });
    pdf.trailer.set("Info", info_id);

    if compress {
        pdf.compress();
    }

    let mut buffer = Vec::new();
    pdf.save_to(&mut buffer)
        .map_err(|e| PdfError::Serialization(e.to_string()))?;
    Ok(buffer)
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

/// PDF text string: literal for ASCII, UTF-16BE with a byte order mark otherwise
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        Object::string_literal(text)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}

/// Content stream operations for one page. Coordinates flip from
/// top-down layout space to bottom-up PDF user space here.
fn page_content(page: &Page) -> Content {
    let mut operations = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Text(run) => push_text(&mut operations, run, page.height),
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            } => {
                let paint = match (fill, stroke) {
                    (Some(_), Some(_)) => "B",
                    (Some(_), None) => "f",
                    (None, Some(_)) => "S",
                    (None, None) => continue,
                };
                operations.push(Operation::new("q", vec![]));
                if let Some(gray) = fill {
                    operations.push(Operation::new("g", vec![real(*gray)]));
                }
                if let Some(gray) = stroke {
                    operations.push(Operation::new("G", vec![real(*gray)]));
                    operations.push(Operation::new("w", vec![real(LINE_WIDTH)]));
                }
                operations.push(Operation::new(
                    "re",
                    vec![
                        real(*x),
                        real(page.height - y - height),
                        real(*width),
                        real(*height),
                    ],
                ));
                operations.push(Operation::new(paint, vec![]));
                operations.push(Operation::new("Q", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                gray,
            } => {
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new("G", vec![real(*gray)]));
                operations.push(Operation::new("w", vec![real(LINE_WIDTH)]));
                operations.push(Operation::new("m", vec![real(*x1), real(page.height - y1)]));
                operations.push(Operation::new("l", vec![real(*x2), real(page.height - y2)]));
                operations.push(Operation::new("S", vec![]));
                operations.push(Operation::new("Q", vec![]));
            }
        }
    }

    Content { operations }
}

fn push_text(operations: &mut Vec<Operation>, run: &TextRun, page_height: f32) {
    let bytes = encode_win_ansi(&run.text);
    if bytes.is_empty() {
        return;
    }

    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new(
        "Tf",
        vec![
            Object::Name(run.style.font.resource_name().as_bytes().to_vec()),
            real(run.style.size),
        ],
    ));
    operations.push(Operation::new("g", vec![real(run.style.gray)]));
    operations.push(Operation::new("Tw", vec![real(run.word_spacing)]));
    operations.push(Operation::new(
        "Td",
        vec![real(run.x), real(page_height - run.y)],
    ));
    operations.push(Operation::new(
        "Tj",
        vec![Object::String(bytes, StringFormat::Literal)],
    ));
    operations.push(Operation::new("ET", vec![]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{PageGeometry, TextRole, TextStyle};
    use crate::stamp::{stamp, FooterInfo};
    use chrono::{TimeZone, Utc};

    fn final_document(texts: &[&str]) -> FinalDocument {
        let geometry = PageGeometry::default();
        let mut page = Page {
            width: geometry.width,
            height: geometry.height,
            ops: Vec::new(),
        };
        for (n, text) in texts.iter().enumerate() {
            page.push(DrawOp::Text(TextRun {
                x: 50.0,
                y: 100.0 + n as f32 * 14.0,
                style: TextStyle::BODY,
                word_spacing: 0.0,
                text: text.to_string(),
                role: TextRole::Body,
            }));
        }
        let info = FooterInfo {
            title: "Access Control Policy".to_string(),
            organization: "Acme Health".to_string(),
            generated: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        };
        stamp(vec![page], &info, &geometry)
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_writes_pdf_header() {
        let bytes = write(&final_document(&["Hello"]), true).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(contains(&bytes, b"%%EOF"));
    }

    #[test]
    fn test_uncompressed_text_is_visible() {
        let bytes = write(&final_document(&["Minimum necessary"]), false).unwrap();
        assert!(contains(&bytes, b"(Minimum necessary) Tj"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));
        assert!(contains(&bytes, b"/Helvetica-Bold"));
        assert!(contains(&bytes, b"(Page 1 of 1) Tj"));
    }

    #[test]
    fn test_text_string_encoding() {
        assert!(matches!(
            text_string("Policy"),
            Object::String(ref bytes, StringFormat::Literal) if bytes == b"Policy"
        ));
        match text_string("Política") {
            Object::String(bytes, StringFormat::Hexadecimal) => {
                assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
            }
            other => panic!("Expected hex string, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_text_emits_nothing() {
        let page = Page {
            width: 100.0,
            height: 100.0,
            ops: vec![DrawOp::Text(TextRun {
                x: 0.0,
                y: 0.0,
                style: TextStyle::BODY,
                word_spacing: 0.0,
                text: String::new(),
                role: TextRole::Body,
            })],
        };
        assert!(page_content(&page).operations.is_empty());
    }
}
