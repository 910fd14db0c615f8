//! printpdf backend: draws a [`DocumentTree`] on a single A4 page.
//!
//! Builtin PDF fonts carry no glyph metrics in printpdf, so line wrapping
//! uses an average advance of half an em. Content that does not fit above
//! the footer is dropped and counted; the document is still produced.
//! The builtin fonts only cover WinAnsi; other characters are printed as
//! `?` and counted.

use std::borrow::Cow;
use std::cell::Cell;

use printpdf::path::PaintMode;
use printpdf::{
    Actions, BuiltinFont, Color, IndirectFontRef, Line, LinkAnnotation, Mm, PdfDocument,
    PdfLayerReference, Point, Rect, Rgb,
};

use super::layout::{Block, DocumentTree, Header, Logo, Section};
use crate::error::AppError;

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 15.0;
const GUTTER: f32 = 8.0;
const HEADER_H: f32 = 52.0;
const FOOTER_H: f32 = 14.0;

const PT_TO_MM: f32 = 0.352_778;
const AVG_ADVANCE_EM: f32 = 0.5;

const TITLE_PT: f32 = 20.0;
const SECTION_PT: f32 = 10.0;
const LABEL_PT: f32 = 6.5;
const VALUE_PT: f32 = 9.0;
const SMALL_PT: f32 = 7.0;

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn ink() -> Color {
    rgb(0.09, 0.09, 0.11)
}

fn muted() -> Color {
    rgb(0.45, 0.45, 0.50)
}

fn accent() -> Color {
    rgb(0.15, 0.35, 0.85)
}

fn white() -> Color {
    rgb(1.0, 1.0, 1.0)
}

fn urgent_red() -> Color {
    rgb(0.86, 0.15, 0.15)
}

fn line_height(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * 1.35
}

fn text_width(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * PT_TO_MM * AVG_ADVANCE_EM
}

/// Greedy word wrap to `width` millimetres. Words longer than a line are
/// split. Explicit newlines start a new line.
pub(crate) fn wrap(text: &str, size_pt: f32, width: f32) -> Vec<String> {
    let per_line = ((width / (size_pt * PT_TO_MM * AVG_ADVANCE_EM)).floor() as usize).max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > per_line {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(per_line);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let word: String = word.into_iter().collect();
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > per_line && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Characters outside Latin-1 that WinAnsiEncoding still covers.
const WIN_ANSI_EXTRA: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

fn win_ansi(c: char) -> bool {
    matches!(c as u32, 0x20..=0x7E | 0xA0..=0xFF) || WIN_ANSI_EXTRA.contains(c)
}

/// `text` with every character the builtin fonts cannot encode replaced by
/// `?`, and the number of replacements.
pub(crate) fn printable(text: &str) -> (Cow<'_, str>, usize) {
    let lost = text.chars().filter(|&c| !win_ansi(c)).count();
    if lost == 0 {
        return (Cow::Borrowed(text), 0);
    }
    let replaced = text.chars().map(|c| if win_ansi(c) { c } else { '?' }).collect();
    (Cow::Owned(replaced), lost)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Characters replaced so far.
    lost: Cell<usize>,
}

impl Fonts {
    fn draw(
        &self,
        layer: &PdfLayerReference,
        text: &str,
        size_pt: f32,
        x: f32,
        y: f32,
        bold: bool,
    ) {
        let (text, lost) = printable(text);
        self.lost.set(self.lost.get() + lost);
        let font = if bold { &self.bold } else { &self.regular };
        layer.use_text(text, size_pt, Mm(x), Mm(y), font);
    }
}

/// A vertical flow of text inside one page column.
struct Column<'a> {
    layer: &'a PdfLayerReference,
    fonts: &'a Fonts,
    x: f32,
    width: f32,
    /// Current top of the free area.
    y: f32,
    floor: f32,
    clipped: usize,
}

impl<'a> Column<'a> {
    /// Reserve `height` mm; `false` (and one clipped item) if it does not fit.
    fn reserve(&mut self, height: f32) -> bool {
        if self.y - height < self.floor {
            self.clipped += 1;
            false
        } else {
            true
        }
    }

    fn text(&mut self, text: &str, size_pt: f32, bold: bool, color: Color) -> bool {
        let h = line_height(size_pt);
        if !self.reserve(h) {
            return false;
        }
        self.layer.set_fill_color(color);
        self.fonts.draw(
            self.layer,
            text,
            size_pt,
            self.x,
            self.y - size_pt * PT_TO_MM,
            bold,
        );
        self.y -= h;
        true
    }

    fn wrapped(&mut self, text: &str, size_pt: f32, color: Color) {
        for line in wrap(text, size_pt, self.width) {
            if !self.text(&line, size_pt, false, color.clone()) {
                break;
            }
        }
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn rule(&mut self) {
        self.layer.set_outline_color(rgb(0.85, 0.85, 0.88));
        self.layer.set_outline_thickness(0.5);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(self.x), Mm(self.y)), false),
                (Point::new(Mm(self.x + self.width), Mm(self.y)), false),
            ],
            is_closed: false,
        });
    }

    fn section(&mut self, section: &Section) {
        if !self.text(section.title, SECTION_PT, true, ink()) {
            return;
        }
        self.gap(1.0);
        self.rule();
        self.gap(2.5);
        for block in &section.blocks {
            self.block(block);
            self.gap(2.0);
        }
        self.gap(3.0);
    }

    fn label(&mut self, label: &str) -> bool {
        self.text(&label.to_uppercase(), LABEL_PT, true, muted())
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Field { label, value } => {
                if self.label(label) {
                    self.wrapped(value, VALUE_PT, ink());
                }
            }
            Block::Checks { label, items } => {
                if self.label(label) {
                    let joined = items
                        .iter()
                        .map(|i| format!("[x] {i}"))
                        .collect::<Vec<_>>()
                        .join("   ");
                    self.wrapped(&joined, VALUE_PT, ink());
                }
            }
            Block::Tags { label, items } => {
                if self.label(label) {
                    self.wrapped(&items.join(" / "), VALUE_PT, ink());
                }
            }
            Block::List { label, items } => {
                if self.label(label) {
                    for item in items {
                        self.wrapped(&format!("- {item}"), VALUE_PT, ink());
                    }
                }
            }
            Block::Links { label, links } => {
                if !self.label(label) {
                    return;
                }
                for link in links {
                    let top = self.y;
                    if !self.text(&link.text, VALUE_PT, true, accent()) {
                        break;
                    }
                    let rect = Rect::new(
                        Mm(self.x),
                        Mm(self.y),
                        Mm(self.x + text_width(&link.text, VALUE_PT)),
                        Mm(top),
                    );
                    self.layer.add_link_annotation(LinkAnnotation::new(
                        rect,
                        None,
                        None,
                        Actions::uri(link.url.clone()),
                        None,
                    ));
                }
            }
        }
    }
}

fn draw_logo(layer: &PdfLayerReference, fonts: &Fonts, logo: &Logo, x: f32, top: f32) {
    let bottom = top - logo.height_mm;
    layer.set_outline_color(rgb(0.7, 0.7, 0.75));
    layer.set_outline_thickness(0.75);
    layer.add_rect(
        Rect::new(Mm(x), Mm(bottom), Mm(x + logo.width_mm), Mm(top)).with_mode(PaintMode::Stroke),
    );
    let text_x = x + (logo.width_mm - text_width(logo.text, SMALL_PT)) / 2.0;
    layer.set_fill_color(rgb(0.7, 0.7, 0.75));
    fonts.draw(layer, logo.text, SMALL_PT, text_x, bottom + logo.height_mm / 2.0 - 1.0, true);
}

fn draw_header(layer: &PdfLayerReference, fonts: &Fonts, header: &Header) {
    let top = PAGE_H;
    let bottom = PAGE_H - HEADER_H;

    layer.set_fill_color(ink());
    layer.add_rect(Rect::new(Mm(0.0), Mm(bottom), Mm(PAGE_W), Mm(top)).with_mode(PaintMode::Fill));

    draw_logo(layer, fonts, &header.logo, MARGIN, top - 5.0);

    layer.set_fill_color(rgb(0.7, 0.7, 0.75));
    fonts.draw(layer, "CLIENT / BRAND", LABEL_PT, MARGIN, top - 20.0, true);
    layer.set_fill_color(white());
    fonts.draw(
        layer,
        header.client.as_deref().unwrap_or("-"),
        SECTION_PT + 2.0,
        MARGIN,
        top - 25.0,
        true,
    );

    layer.set_fill_color(rgb(0.7, 0.7, 0.75));
    fonts.draw(layer, "PROJECT", LABEL_PT, MARGIN, top - 31.0, true);
    layer.set_fill_color(white());
    fonts.draw(
        layer,
        header.project.as_deref().unwrap_or("Creative Brief"),
        TITLE_PT,
        MARGIN,
        top - 39.0,
        true,
    );

    let meta = header
        .meta
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join("     ");
    layer.set_fill_color(rgb(0.8, 0.8, 0.85));
    fonts.draw(layer, &meta, SMALL_PT, MARGIN, bottom + 5.0, false);

    if header.urgent {
        let w = 38.0;
        let (x1, y1) = (PAGE_W - MARGIN - w, top - 13.0);
        layer.set_fill_color(urgent_red());
        layer.add_rect(Rect::new(Mm(x1), Mm(y1), Mm(x1 + w), Mm(y1 + 8.0)).with_mode(PaintMode::Fill));
        layer.set_fill_color(white());
        fonts.draw(layer, "URGENT PRIORITY", SMALL_PT + 1.0, x1 + 4.0, y1 + 2.7, true);
    }
}

fn draw_footer(layer: &PdfLayerReference, fonts: &Fonts, tree: &DocumentTree) {
    let y = MARGIN - 5.0;
    layer.set_outline_color(rgb(0.85, 0.85, 0.88));
    layer.set_outline_thickness(0.5);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN), Mm(y + 5.0)), false),
            (Point::new(Mm(PAGE_W - MARGIN), Mm(y + 5.0)), false),
        ],
        is_closed: false,
    });
    layer.set_fill_color(muted());
    fonts.draw(layer, &tree.footer.generated, SMALL_PT, MARGIN, y, false);
    let marker_x = PAGE_W / 2.0 - text_width(tree.footer.marker, SMALL_PT) / 2.0;
    fonts.draw(layer, tree.footer.marker, SMALL_PT, marker_x, y, true);
    let page_x = PAGE_W - MARGIN - text_width(&tree.footer.page, SMALL_PT);
    fonts.draw(layer, &tree.footer.page, SMALL_PT, page_x, y, false);
}

/// Render `tree` to PDF bytes.
///
/// Sections 01-03 flow down the left column and 04-06 down the right.
pub fn render(tree: &DocumentTree) -> Result<Vec<u8>, AppError> {
    let title = tree.header.project.as_deref().unwrap_or("Creative Brief");
    let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Brief");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::Render(format!("cannot load font: {e}")))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::Render(format!("cannot load font: {e}")))?,
        lost: Cell::new(0),
    };
    let layer = doc.get_page(page).get_layer(layer);

    draw_header(&layer, &fonts, &tree.header);

    let col_w = (PAGE_W - 2.0 * MARGIN - GUTTER) / 2.0;
    let top = PAGE_H - HEADER_H - 10.0;
    let floor = MARGIN + FOOTER_H - 5.0;
    let mut clipped = 0;
    let half = tree.sections.len().div_ceil(2);
    for (i, chunk) in tree.sections.chunks(half.max(1)).enumerate() {
        let mut column = Column {
            layer: &layer,
            fonts: &fonts,
            x: MARGIN + i as f32 * (col_w + GUTTER),
            width: col_w,
            y: top,
            floor,
            clipped: 0,
        };
        for section in chunk {
            column.section(section);
        }
        clipped += column.clipped;
    }

    draw_footer(&layer, &fonts, tree);

    if clipped > 0 {
        tracing::warn!(clipped, "brief does not fit on one page; overflow clipped");
    }
    let lost = fonts.lost.get();
    if lost > 0 {
        tracing::warn!(lost, "characters outside the PDF font encoding printed as '?'");
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::Render(format!("cannot write PDF: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn printable_keeps_latin_text() {
        let (text, lost) = printable("Café – Ramadan Special €");
        assert_eq!(text, "Café – Ramadan Special €");
        assert_eq!(lost, 0);
        assert!(matches!(text, Cow::Borrowed(_)));
    }

    #[test]
    fn printable_replaces_unencodable_characters() {
        let (text, lost) = printable("سبعة 7Ciel");
        assert_eq!(text, "???? 7Ciel");
        assert_eq!(lost, 4);
    }

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap("Warm and bright", VALUE_PT, 80.0), vec!["Warm and bright"]);
    }

    #[test]
    fn wrap_breaks_on_words_within_width() {
        let text = "word ".repeat(60);
        let lines = wrap(&text, VALUE_PT, 40.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, VALUE_PT) <= 40.0 + 0.001, "too wide: {line}");
            assert!(!line.starts_with(' ') && !line.ends_with(' '));
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined.split_whitespace().count(), 60);
    }

    #[test]
    fn wrap_splits_words_longer_than_a_line() {
        let url = format!("https://example.com/{}", "a".repeat(200));
        let lines = wrap(&url, VALUE_PT, 30.0);
        assert!(lines.len() > 2);
        assert_eq!(lines.concat(), url);
    }

    #[test]
    fn wrap_honours_newlines_and_skips_blank_lines() {
        assert_eq!(wrap("one\n\ntwo", VALUE_PT, 80.0), vec!["one", "two"]);
    }
}
