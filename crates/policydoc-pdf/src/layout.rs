//! Page layout
//!
//! First phase of PDF generation. The parsed tree is flattened into a list
//! of elements (headings, wrapped text, table rows, gaps), then placed onto
//! A4 pages by a [`Layout`] that owns the vertical [`Cursor`].
//!
//! Coordinates here are in points measured from the top-left corner of the
//! page; text positions are baselines. The writer flips them into PDF user
//! space.
//!
//! Break rules:
//!
//! - every element checks its height against the space left above the
//!   footer band and starts a new page when it does not fit
//! - a heading reserves room for itself plus the first unbreakable unit
//!   after it, so it never ends a page
//! - paragraphs move whole unless they are taller than a page, in which
//!   case they break between lines
//! - continuation pages get the running header

use policydoc_ast::{inlines_to_text, Block, DocumentRequest, List, ParsedDocument, Table};
use policydoc_core::config::PdfSettings;
use policydoc_core::inline::parse_inlines;
use policydoc_core::sanitize::normalize_whitespace;
use policydoc_core::Settings;

use crate::metrics::Font;
use crate::text::clean_for_draw;

/// Points per millimetre
pub const MM: f32 = 72.0 / 25.4;

/// A4 width in points
pub const A4_WIDTH: f32 = 595.28;

/// A4 height in points
pub const A4_HEIGHT: f32 = 841.89;

const LEADING: f32 = 1.4;
const HEADING_SPACE_BEFORE: f32 = 10.0;
const HEADING_SPACE_AFTER: f32 = 2.0;
const BLOCK_GAP: f32 = 6.0;
const LIST_INDENT: f32 = 16.0;
const MARKER_INSET: f32 = 4.0;
const CELL_PADDING: f32 = 4.0;
const ROW_HEIGHT: f32 = 20.0;
const HEADER_FILL: f32 = 0.93;
const RULE_GRAY: f32 = 0.6;
const FIT_TOLERANCE: f32 = 0.01;

/// Font, size and gray level of a text run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    /// Fill gray, 0.0 is black
    pub gray: f32,
}

impl TextStyle {
    pub const TITLE: TextStyle = TextStyle {
        font: Font::Bold,
        size: 16.0,
        gray: 0.0,
    };
    pub const SECTION: TextStyle = TextStyle {
        font: Font::Bold,
        size: 12.0,
        gray: 0.0,
    };
    pub const SUBSECTION: TextStyle = TextStyle {
        font: Font::Bold,
        size: 11.0,
        gray: 0.0,
    };
    pub const BODY: TextStyle = TextStyle {
        font: Font::Regular,
        size: 10.0,
        gray: 0.0,
    };
    pub const TABLE: TextStyle = TextStyle {
        font: Font::Regular,
        size: 9.0,
        gray: 0.0,
    };
    pub const CHROME: TextStyle = TextStyle {
        font: Font::Regular,
        size: 8.0,
        gray: 0.45,
    };

    /// Line height for this style
    pub fn leading(&self) -> f32 {
        self.size * LEADING
    }
}

/// What a text run is, for inspection after layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Heading,
    Body,
    ListItem,
    Table,
    /// Running header and footer
    Chrome,
}

/// One line of text at a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    /// Baseline, measured from the top of the page
    pub y: f32,
    pub style: TextStyle,
    /// Extra space added to each word gap, for justification
    pub word_spacing: f32,
    pub text: String,
    pub role: TextRole,
}

/// A drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text(TextRun),
    /// Rectangle with its top-left corner at (`x`, `y`)
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<f32>,
        stroke: Option<f32>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        gray: f32,
    },
}

/// A laid-out page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl Page {
    fn new(geometry: &PageGeometry) -> Self {
        Self {
            width: geometry.width,
            height: geometry.height,
            ops: Vec::new(),
        }
    }

    /// Add a drawing operation
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// All text runs in drawing order
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }

    /// Text runs that are document content rather than page chrome
    pub fn content_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.text_runs().filter(|run| run.role != TextRole::Chrome)
    }
}

/// Vertical position on a given page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// Zero-based page index
    pub page: usize,
    /// Top of the next free line, from the top of the page
    pub y: f32,
}

/// Page size and margins, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    /// Left, right and top margin
    pub margin: f32,
    /// Space reserved at the bottom for the footer
    pub footer_band: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::from_settings(&PdfSettings::default())
    }
}

impl PageGeometry {
    /// A4 geometry from the `[pdf]` settings
    pub fn from_settings(settings: &PdfSettings) -> Self {
        Self {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margin: settings.margin_mm.clamp(5.0, 60.0) * MM,
            footer_band: settings.footer_band_mm.clamp(10.0, 60.0) * MM,
        }
    }

    pub fn content_left(&self) -> f32 {
        self.margin
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn content_top(&self) -> f32 {
        self.margin
    }

    /// Lowest point content may reach
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.footer_band
    }

    pub fn content_height(&self) -> f32 {
        self.bottom_limit() - self.content_top()
    }

    /// Baseline of the running header
    pub fn header_baseline(&self) -> f32 {
        self.margin * 0.6
    }

    /// Baseline of the footer line
    pub fn footer_baseline(&self) -> f32 {
        self.height - self.footer_band / 2.0
    }
}

/// Everything layout needs besides the tree itself
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutContext {
    pub geometry: PageGeometry,
    pub title: String,
    pub organization: String,
    pub policy_id: Option<String>,
    pub notice: String,
    pub separator_min_run: usize,
}

impl LayoutContext {
    /// Build the context for one request, cleaning its metadata for drawing
    pub fn new(request: &DocumentRequest, settings: &Settings) -> Self {
        let separator_min_run = settings.classifier.separator_min_run;
        let clean = |text: &str| draw_text(text, separator_min_run);

        Self {
            geometry: PageGeometry::from_settings(&settings.pdf),
            title: clean(&request.title),
            organization: clean(&request.organization_name),
            policy_id: request
                .policy_id
                .as_deref()
                .map(clean)
                .filter(|id| !id.is_empty()),
            notice: clean(&settings.document.confidentiality_notice),
            separator_min_run,
        }
    }

    fn clean(&self, text: &str) -> String {
        draw_text(text, self.separator_min_run)
    }
}

/// Pre-draw cleaning plus whitespace and control character normalization
fn draw_text(text: &str, separator_min_run: usize) -> String {
    let cleaned = clean_for_draw(text, separator_min_run);
    let cleaned: String = cleaned
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    normalize_whitespace(&cleaned)
}

/// A wrapped line with its measured width
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    pub width: f32,
}

/// Greedy word wrap. Words wider than the line are broken by character.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<WrappedLine> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;
    let space_width = font.char_width(' ', size);

    for word in text.split_whitespace() {
        for piece in split_long_word(word, font, size, max_width) {
            let piece_width = font.text_width(&piece, size);

            if current.is_empty() {
                current = piece;
                current_width = piece_width;
            } else if current_width + space_width + piece_width <= max_width {
                current.push(' ');
                current.push_str(&piece);
                current_width += space_width + piece_width;
            } else {
                lines.push(WrappedLine {
                    text: std::mem::take(&mut current),
                    width: current_width,
                });
                current = piece;
                current_width = piece_width;
            }
        }
    }

    if !current.is_empty() {
        lines.push(WrappedLine {
            text: current,
            width: current_width,
        });
    }

    lines
}

fn split_long_word(word: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    if font.text_width(word, size) <= max_width {
        return vec![word.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut width = 0.0;
    for ch in word.chars() {
        let ch_width = font.char_width(ch, size);
        if !current.is_empty() && width + ch_width > max_width {
            pieces.push(std::mem::take(&mut current));
            width = 0.0;
        }
        current.push(ch);
        width += ch_width;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Shorten text to `max_width`, ending it with an ellipsis when cut
pub fn truncate_to_width(text: &str, font: Font, size: f32, max_width: f32) -> String {
    if font.text_width(text, size) <= max_width {
        return text.to_string();
    }

    let ellipsis = '\u{2026}';
    let budget = max_width - font.char_width(ellipsis, size);
    let mut out = String::new();
    let mut width = 0.0;
    for ch in text.chars() {
        let ch_width = font.char_width(ch, size);
        if width + ch_width > budget {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out.push(ellipsis);
    out
}

/// A table row ready for drawing
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RowElement {
    /// Wrapped lines per cell
    pub cells: Vec<Vec<String>>,
    /// Font per cell
    pub fonts: Vec<Font>,
    pub header: bool,
    pub column_width: f32,
}

impl RowElement {
    fn line_count(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0).max(1)
    }

    fn height(&self) -> f32 {
        ROW_HEIGHT + (self.line_count() - 1) as f32 * TextStyle::TABLE.leading()
    }
}

/// Flattened layout unit
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Element {
    Heading {
        style: TextStyle,
        lines: Vec<String>,
    },
    Text {
        style: TextStyle,
        marker: Option<String>,
        indent: f32,
        lines: Vec<WrappedLine>,
        justify: bool,
        role: TextRole,
    },
    Row(RowElement),
    Gap(f32),
}

impl Element {
    fn height(&self) -> f32 {
        match self {
            Element::Heading { style, lines } => {
                HEADING_SPACE_BEFORE + lines.len() as f32 * style.leading() + HEADING_SPACE_AFTER
            }
            Element::Text { style, lines, .. } => lines.len() as f32 * style.leading(),
            Element::Row(row) => row.height(),
            Element::Gap(gap) => *gap,
        }
    }
}

/// Flatten the parsed tree into layout elements
pub(crate) fn build_elements(doc: &ParsedDocument, ctx: &LayoutContext) -> Vec<Element> {
    let mut elements = Vec::new();

    for section in &doc.sections {
        if let Some(title) = &section.title {
            push_heading(&mut elements, ctx, title, TextStyle::SECTION);
        }
        push_blocks(&mut elements, ctx, &section.blocks);

        for sub in &section.subsections {
            push_heading(&mut elements, ctx, &sub.title, TextStyle::SUBSECTION);
            push_blocks(&mut elements, ctx, &sub.blocks);
        }
    }

    elements
}

/// Printable text of a heading or table cell; download markers read `Download: URL`
fn link_text(text: &str) -> String {
    inlines_to_text(&parse_inlines(text))
}

fn push_heading(elements: &mut Vec<Element>, ctx: &LayoutContext, title: &str, style: TextStyle) {
    let text = ctx.clean(&link_text(title));
    let lines: Vec<String> = wrap_text(&text, style.font, style.size, ctx.geometry.content_width())
        .into_iter()
        .map(|line| line.text)
        .collect();
    if !lines.is_empty() {
        elements.push(Element::Heading { style, lines });
    }
}

fn push_blocks(elements: &mut Vec<Element>, ctx: &LayoutContext, blocks: &[Block]) {
    for block in blocks {
        match block {
            Block::Paragraph(para) => {
                let text = ctx.clean(&para.text());
                let style = TextStyle::BODY;
                let lines = wrap_text(&text, style.font, style.size, ctx.geometry.content_width());
                if lines.is_empty() {
                    continue;
                }
                elements.push(Element::Text {
                    style,
                    marker: None,
                    indent: 0.0,
                    lines,
                    justify: true,
                    role: TextRole::Body,
                });
                elements.push(Element::Gap(BLOCK_GAP));
            }
            Block::List(list) => push_list(elements, ctx, list),
            Block::Table(table) => push_table(elements, ctx, table),
        }
    }
}

fn push_list(elements: &mut Vec<Element>, ctx: &LayoutContext, list: &List) {
    let style = TextStyle::BODY;
    let width = ctx.geometry.content_width() - LIST_INDENT;
    let mut pushed = false;

    for (idx, item) in list.items.iter().enumerate() {
        let text = ctx.clean(&item.text());
        let lines = wrap_text(&text, style.font, style.size, width);
        if lines.is_empty() {
            continue;
        }
        let marker = if list.ordered {
            format!("{}.", item.ordinal.unwrap_or(idx as u32 + 1))
        } else {
            "\u{2022}".to_string()
        };
        elements.push(Element::Text {
            style,
            marker: Some(marker),
            indent: LIST_INDENT,
            lines,
            justify: false,
            role: TextRole::ListItem,
        });
        pushed = true;
    }

    if pushed {
        elements.push(Element::Gap(BLOCK_GAP));
    }
}

fn push_table(elements: &mut Vec<Element>, ctx: &LayoutContext, table: &Table) {
    let columns = table.column_count();
    if columns == 0 || (table.rows.is_empty() && table.headers.is_empty()) {
        return;
    }

    let column_width = ctx.geometry.content_width() / columns as f32;
    let max_lines = max_lines_per_row(&ctx.geometry);
    let field_value = table.is_field_value();

    if !table.headers.is_empty() {
        let fonts = vec![Font::Bold; columns];
        push_row(elements, ctx, &table.headers, fonts, true, column_width, max_lines);
    }

    for row in &table.rows {
        let fonts = (0..columns)
            .map(|c| {
                if field_value && c == 0 {
                    Font::Bold
                } else {
                    Font::Regular
                }
            })
            .collect();
        push_row(elements, ctx, row, fonts, false, column_width, max_lines);
    }

    elements.push(Element::Gap(BLOCK_GAP));
}

fn max_lines_per_row(geometry: &PageGeometry) -> usize {
    let extra = (geometry.content_height() - ROW_HEIGHT) / TextStyle::TABLE.leading();
    extra.max(0.0).floor() as usize + 1
}

fn push_row(
    elements: &mut Vec<Element>,
    ctx: &LayoutContext,
    cells: &[String],
    fonts: Vec<Font>,
    header: bool,
    column_width: f32,
    max_lines: usize,
) {
    let inner_width = column_width - 2.0 * CELL_PADDING;
    let wrapped: Vec<Vec<String>> = fonts
        .iter()
        .enumerate()
        .map(|(c, font)| {
            let text = cells
                .get(c)
                .map(|cell| ctx.clean(&link_text(cell)))
                .unwrap_or_default();
            wrap_text(&text, *font, TextStyle::TABLE.size, inner_width)
                .into_iter()
                .map(|line| line.text)
                .collect()
        })
        .collect();

    // A row taller than a page is split into several rows
    let total_lines = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let mut start = 0;
    while start < total_lines {
        let end = (start + max_lines).min(total_lines);
        let cells = wrapped
            .iter()
            .map(|lines| {
                lines
                    .get(start.min(lines.len())..end.min(lines.len()))
                    .map(<[String]>::to_vec)
                    .unwrap_or_default()
            })
            .collect();
        elements.push(Element::Row(RowElement {
            cells,
            fonts: fonts.clone(),
            header,
            column_width,
        }));
        start = end;
    }
}

/// Height that must fit below a heading: following headings plus the
/// first unit that cannot be split
fn keep_height(elements: &[Element], start: usize, content_height: f32) -> f32 {
    let mut total = 0.0;

    for element in elements.iter().skip(start) {
        match element {
            Element::Gap(_) => continue,
            Element::Heading { .. } => total += element.height(),
            Element::Row(row) if row.header => total += row.height(),
            Element::Row(row) => {
                total += row.height();
                break;
            }
            Element::Text { style, .. } => {
                let height = element.height();
                total += if height <= content_height {
                    height
                } else {
                    style.leading()
                };
                break;
            }
        }
        if total >= content_height {
            break;
        }
    }

    total.min(content_height)
}

/// Extra word spacing that stretches `line` to `max_width`
fn justify_spacing(line: &WrappedLine, max_width: f32, style: &TextStyle) -> f32 {
    let spaces = line.text.matches(' ').count();
    if spaces == 0 {
        return 0.0;
    }
    let spacing = (max_width - line.width) / spaces as f32;
    if spacing > 0.0 && spacing <= style.size {
        spacing
    } else {
        0.0
    }
}

/// Page builder holding the cursor
pub struct Layout<'a> {
    ctx: &'a LayoutContext,
    pages: Vec<Page>,
    pub(crate) cursor: Cursor,
}

impl<'a> Layout<'a> {
    /// Start with one empty page and the cursor at the top margin
    pub fn new(ctx: &'a LayoutContext) -> Self {
        Self {
            ctx,
            pages: vec![Page::new(&ctx.geometry)],
            cursor: Cursor {
                page: 0,
                y: ctx.geometry.content_top(),
            },
        }
    }

    /// Current cursor
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Number of pages so far
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Finish layout and hand over the pages
    pub fn finish(self) -> Vec<Page> {
        self.pages
    }

    fn geometry(&self) -> &PageGeometry {
        &self.ctx.geometry
    }

    fn page_mut(&mut self) -> &mut Page {
        let idx = self.cursor.page;
        &mut self.pages[idx]
    }

    fn at_page_top(&self) -> bool {
        self.cursor.y <= self.geometry().content_top() + FIT_TOLERANCE
    }

    fn remaining(&self) -> f32 {
        self.geometry().bottom_limit() - self.cursor.y
    }

    /// Start a new page unless `needed` points fit above the footer band.
    ///
    /// Returns whether a page break happened. A fresh page never breaks
    /// again, so oversized content still makes progress.
    pub fn ensure_space(&mut self, needed: f32) -> bool {
        if needed > self.remaining() + FIT_TOLERANCE && !self.at_page_top() {
            self.new_page();
            true
        } else {
            false
        }
    }

    /// Open a new page with the running header
    pub fn new_page(&mut self) {
        self.pages.push(Page::new(&self.ctx.geometry));
        self.cursor = Cursor {
            page: self.pages.len() - 1,
            y: self.geometry().content_top(),
        };
        self.running_header();
    }

    fn running_header(&mut self) {
        let geometry = *self.geometry();
        let style = TextStyle::CHROME;
        let title = truncate_to_width(
            &self.ctx.title,
            style.font,
            style.size,
            geometry.content_width(),
        );
        let baseline = geometry.header_baseline();

        if !title.is_empty() {
            self.page_mut().push(DrawOp::Text(TextRun {
                x: geometry.content_left(),
                y: baseline,
                style,
                word_spacing: 0.0,
                text: title,
                role: TextRole::Chrome,
            }));
        }
        self.page_mut().push(DrawOp::Line {
            x1: geometry.content_left(),
            y1: baseline + 4.0,
            x2: geometry.content_left() + geometry.content_width(),
            y2: baseline + 4.0,
            gray: RULE_GRAY,
        });
    }

    /// Draw one line at the cursor and advance by the style's leading
    fn draw_line(
        &mut self,
        x: f32,
        text: String,
        style: TextStyle,
        word_spacing: f32,
        role: TextRole,
    ) {
        let y = self.cursor.y + style.size;
        self.page_mut().push(DrawOp::Text(TextRun {
            x,
            y,
            style,
            word_spacing,
            text,
            role,
        }));
        self.cursor.y += style.leading();
    }

    fn draw_centered(&mut self, text: &str, style: TextStyle, role: TextRole) {
        let geometry = *self.geometry();
        for line in wrap_text(text, style.font, style.size, geometry.content_width()) {
            self.ensure_space(style.leading());
            let x = geometry.content_left() + (geometry.content_width() - line.width) / 2.0;
            self.draw_line(x, line.text, style, 0.0, role);
        }
    }

    /// Title, policy ID, organization and notice at the top of page one
    pub fn place_title_block(&mut self) {
        let ctx = self.ctx;

        self.draw_centered(&ctx.title, TextStyle::TITLE, TextRole::Title);
        self.cursor.y += 2.0;

        if let Some(id) = &ctx.policy_id {
            let style = TextStyle {
                size: 9.0,
                ..TextStyle::CHROME
            };
            self.draw_centered(&format!("Policy ID: {}", id), style, TextRole::Title);
        }
        if !ctx.organization.is_empty() {
            self.draw_centered(&ctx.organization, TextStyle::BODY, TextRole::Title);
        }
        let notice_style = TextStyle {
            font: Font::Bold,
            size: 9.0,
            gray: 0.3,
        };
        self.draw_centered(&ctx.notice, notice_style, TextRole::Title);

        let geometry = *self.geometry();
        self.cursor.y += 4.0;
        let y = self.cursor.y;
        self.page_mut().push(DrawOp::Line {
            x1: geometry.content_left(),
            y1: y,
            x2: geometry.content_left() + geometry.content_width(),
            y2: y,
            gray: 0.0,
        });
        self.cursor.y += 14.0;
    }

    /// Place every element in order
    pub(crate) fn place_all(&mut self, elements: &[Element]) {
        for idx in 0..elements.len() {
            self.place(elements, idx);
        }
    }

    fn place(&mut self, elements: &[Element], idx: usize) {
        let geometry = *self.geometry();
        let element = &elements[idx];

        match element {
            Element::Heading { style, lines } => {
                let needed = element.height()
                    + keep_height(elements, idx + 1, geometry.content_height());
                self.ensure_space(needed.min(geometry.content_height()));
                if !self.at_page_top() {
                    self.cursor.y += HEADING_SPACE_BEFORE;
                }
                for line in lines {
                    self.ensure_space(style.leading());
                    self.draw_line(
                        geometry.content_left(),
                        line.clone(),
                        *style,
                        0.0,
                        TextRole::Heading,
                    );
                }
                self.cursor.y += HEADING_SPACE_AFTER;
            }
            Element::Text {
                style,
                marker,
                indent,
                lines,
                justify,
                role,
            } => {
                let total = element.height();
                if total <= geometry.content_height() {
                    self.ensure_space(total);
                }

                let max_width = geometry.content_width() - indent;
                let last = lines.len().saturating_sub(1);
                for (n, line) in lines.iter().enumerate() {
                    self.ensure_space(style.leading());
                    if n == 0 {
                        if let Some(marker) = marker {
                            let y = self.cursor.y + style.size;
                            self.page_mut().push(DrawOp::Text(TextRun {
                                x: geometry.content_left() + MARKER_INSET,
                                y,
                                style: *style,
                                word_spacing: 0.0,
                                text: marker.clone(),
                                role: *role,
                            }));
                        }
                    }
                    let word_spacing = if *justify && n < last {
                        justify_spacing(line, max_width, style)
                    } else {
                        0.0
                    };
                    self.draw_line(
                        geometry.content_left() + indent,
                        line.text.clone(),
                        *style,
                        word_spacing,
                        *role,
                    );
                }
            }
            Element::Row(row) => {
                let height = row.height();
                let needed = if row.header {
                    height + keep_height(elements, idx + 1, geometry.content_height())
                } else {
                    height
                };
                self.ensure_space(needed.min(geometry.content_height()));
                self.draw_row(row);
            }
            Element::Gap(gap) => {
                if !self.at_page_top() {
                    self.cursor.y = (self.cursor.y + gap).min(geometry.bottom_limit());
                }
            }
        }
    }

    fn draw_row(&mut self, row: &RowElement) {
        let geometry = *self.geometry();
        let top = self.cursor.y;
        let height = row.height();
        let fill = row.header.then_some(HEADER_FILL);

        for c in 0..row.cells.len() {
            let x = geometry.content_left() + c as f32 * row.column_width;
            self.page_mut().push(DrawOp::Rect {
                x,
                y: top,
                width: row.column_width,
                height,
                fill,
                stroke: Some(RULE_GRAY),
            });
        }

        for (c, lines) in row.cells.iter().enumerate() {
            let x = geometry.content_left() + c as f32 * row.column_width + CELL_PADDING;
            let style = TextStyle {
                font: row.fonts.get(c).copied().unwrap_or(Font::Regular),
                ..TextStyle::TABLE
            };
            for (n, line) in lines.iter().enumerate() {
                let y = top + CELL_PADDING + style.size + n as f32 * style.leading();
                self.page_mut().push(DrawOp::Text(TextRun {
                    x,
                    y,
                    style,
                    word_spacing: 0.0,
                    text: line.clone(),
                    role: TextRole::Table,
                }));
            }
        }

        self.cursor.y = top + height;
    }
}

/// Lay out a parsed document onto pages, without footers
pub fn layout(doc: &ParsedDocument, ctx: &LayoutContext) -> Vec<Page> {
    let elements = build_elements(doc, ctx);
    let mut layout = Layout::new(ctx);
    layout.place_title_block();
    layout.place_all(&elements);
    layout.finish()
}
