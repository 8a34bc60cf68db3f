//! Page layout: positions text, tables and bars on A4 pages.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner.
//! Only integer operands are emitted.

use lopdf::Object;
use lopdf::content::Operation;

pub(crate) const PAGE_WIDTH: i64 = 595;
pub(crate) const PAGE_HEIGHT: i64 = 842;
pub(crate) const MARGIN: i64 = 50;

const TOP: i64 = PAGE_HEIGHT - MARGIN;
/// Lowest baseline for content; the footer sits below it.
const BOTTOM: i64 = 60;
const FOOTER_BASELINE: i64 = 30;

const BODY_SIZE: i64 = 10;
const LINE_HEIGHT: i64 = 14;

/// Horizontal offset of bars from the left margin.
const BAR_OFFSET: i64 = 150;
/// Width of a bar representing the maximum value.
const BAR_WIDTH: i64 = 280;
const BAR_HEIGHT: i64 = 9;

/// Standard Type1 fonts registered in the page resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Font {
    Regular,
    Bold,
    Mono,
    MonoBold,
}

impl Font {
    pub(crate) const ALL: [Font; 4] = [Self::Regular, Self::Bold, Self::Mono, Self::MonoBold];

    /// Resource name.
    pub(crate) fn key(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Mono => "F3",
            Self::MonoBold => "F4",
        }
    }

    pub(crate) fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Mono => "Courier",
            Self::MonoBold => "Courier-Bold",
        }
    }
}

/// Content of one page.
#[derive(Debug, Default)]
pub(crate) struct Page {
    pub(crate) operations: Vec<Operation>,
    /// Every text string drawn on the page, in drawing order.
    pub(crate) lines: Vec<String>,
}

impl Page {
    fn draw_text(&mut self, font: Font, size: i64, x: i64, y: i64, text: &str) {
        let text = sanitize(text);
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.key().into(), Object::Integer(size)]),
            Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]),
            Operation::new("Tj", vec![Object::string_literal(text.as_str())]),
            Operation::new("ET", vec![]),
        ]);
        self.lines.push(text);
    }

    fn draw_bar(&mut self, x: i64, y: i64, width: i64) {
        self.operations.extend([
            Operation::new(
                "rg",
                vec![Object::Integer(0), Object::Integer(0), Object::Integer(1)],
            ),
            Operation::new(
                "re",
                vec![
                    Object::Integer(x),
                    Object::Integer(y),
                    Object::Integer(width),
                    Object::Integer(BAR_HEIGHT),
                ],
            ),
            Operation::new("f", vec![]),
            Operation::new("g", vec![Object::Integer(0)]),
        ]);
    }

    /// Draws the centred "Page i of n" footer.
    pub(crate) fn add_footer(&mut self, number: usize, count: usize) {
        let text = format!("Page {number} of {count}");
        // Courier advances 0.6 em per glyph.
        let width = text.len() as i64 * BODY_SIZE * 6 / 10;
        self.draw_text(
            Font::Mono,
            BODY_SIZE,
            (PAGE_WIDTH - width) / 2,
            FOOTER_BASELINE,
            &text,
        );
    }
}

/// Flows content top to bottom, starting new pages as needed.
#[derive(Debug)]
pub(crate) struct PageWriter {
    pages: Vec<Page>,
    current: Page,
    y: i64,
}

impl PageWriter {
    pub(crate) fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Page::default(),
            y: TOP,
        }
    }

    pub(crate) fn new_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
        self.y = TOP;
    }

    fn ensure_space(&mut self, height: i64) {
        if self.y - height < BOTTOM {
            self.new_page();
        }
    }

    pub(crate) fn spacer(&mut self, height: i64) {
        self.y -= height;
    }

    /// Large centred-left title line.
    pub(crate) fn title(&mut self, text: &str) {
        self.ensure_space(40);
        self.y -= 30;
        self.current.draw_text(Font::Bold, 22, MARGIN, self.y, text);
        self.y -= 12;
    }

    pub(crate) fn heading(&mut self, text: &str) {
        // Keep a heading together with at least two lines of content.
        self.ensure_space(22 + 3 * LINE_HEIGHT);
        self.y -= 22;
        self.current.draw_text(Font::Bold, 14, MARGIN, self.y, text);
        self.y -= 6;
    }

    pub(crate) fn subheading(&mut self, text: &str) {
        self.ensure_space(18 + 2 * LINE_HEIGHT);
        self.y -= 18;
        self.current.draw_text(Font::Bold, 11, MARGIN, self.y, text);
        self.y -= 2;
    }

    pub(crate) fn paragraph(&mut self, text: &str) {
        self.line(Font::Regular, text);
    }

    fn line(&mut self, font: Font, text: &str) {
        self.ensure_space(LINE_HEIGHT);
        self.y -= LINE_HEIGHT;
        self.current.draw_text(font, BODY_SIZE, MARGIN, self.y, text);
    }

    /// Fixed-width table; cells are padded or clipped to `widths` characters.
    ///
    /// The header is repeated at the top of every continuation page.
    pub(crate) fn table(&mut self, header: &[&str], widths: &[usize], rows: &[Vec<String>]) {
        let header_line = format_row(header.iter().copied(), widths);
        let rule = "-".repeat(header_line.len());

        self.ensure_space(3 * LINE_HEIGHT);
        self.line(Font::MonoBold, &header_line);
        self.line(Font::Mono, &rule);

        for row in rows {
            if self.y - LINE_HEIGHT < BOTTOM {
                self.new_page();
                self.line(Font::MonoBold, &header_line);
                self.line(Font::Mono, &rule);
            }
            self.line(Font::Mono, &format_row(row.iter().map(String::as_str), widths));
        }
    }

    /// Labelled horizontal bar scaled against `max`.
    pub(crate) fn bar(&mut self, label: &str, value: f64, max: f64, annotation: &str) {
        self.ensure_space(LINE_HEIGHT);
        self.y -= LINE_HEIGHT;
        self.current
            .draw_text(Font::Mono, 9, MARGIN, self.y, &clip(label, 24));

        let width = bar_width(value, max);
        if width > 0 {
            self.current.draw_bar(MARGIN + BAR_OFFSET, self.y - 1, width);
        }
        self.current.draw_text(
            Font::Mono,
            9,
            MARGIN + BAR_OFFSET + width + 6,
            self.y,
            annotation,
        );
    }

    /// All pages, including the one in progress.
    pub(crate) fn finish(mut self) -> Vec<Page> {
        if !self.current.operations.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        self.pages
    }
}

/// Bar length in points; negative or non-finite values draw nothing.
fn bar_width(value: f64, max: f64) -> i64 {
    let ratio = value / max;
    if !ratio.is_finite() || max <= 0.0 || ratio <= 0.0 {
        return 0;
    }
    (ratio.min(1.0) * BAR_WIDTH as f64).round() as i64
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", clip(cell, *width), width = *width))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

/// Truncates to `max` characters, marking the cut with `~`.
pub(crate) fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max.saturating_sub(1)).collect();
    clipped.push('~');
    clipped
}

/// Replaces characters outside printable ASCII, which the standard fonts
/// cannot show without an explicit encoding.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c == ' ' || c.is_ascii_graphic() { c } else { '?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip() {
        assert_eq!(clip("Pump", 10), "Pump");
        assert_eq!(clip("Centrifugal Pump", 8), "Centrif~");
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Druck (bar) \u{2013} m\u{b3}/h"), "Druck (bar) ? m?/h");
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(5.0, 10.0), 140);
        assert_eq!(bar_width(10.0, 10.0), 280);
        assert_eq!(bar_width(-1.0, 10.0), 0);
        assert_eq!(bar_width(1.0, 0.0), 0);
        assert_eq!(bar_width(f64::NAN, 10.0), 0);
    }

    #[test]
    fn test_table_repeats_header_on_new_page() {
        let mut writer = PageWriter::new();
        let rows: Vec<Vec<String>> = (0..80).map(|i| vec![format!("P-{i}")]).collect();
        writer.table(&["Name"], &[10], &rows);
        let pages = writer.finish();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].lines[0], "Name");
        let body_lines: usize = pages.iter().map(|p| p.lines.len() - 2).sum();
        assert_eq!(body_lines, 80);
    }

    #[test]
    fn test_finish_always_yields_a_page() {
        assert_eq!(PageWriter::new().finish().len(), 1);
    }

    #[test]
    fn test_format_row_pads_columns() {
        let row = format_row(["Name", "Type"].into_iter(), &[6, 4]);
        assert_eq!(row, "Name   Type");
    }
}
