//! Canvas layout loop for PDF export.
//!
//! The extracted block sequence drives a low-level drawing interface:
//! text blocks render as wrapped paragraphs with heading-shaped lines
//! bold at a larger size, table blocks as bordered grids with
//! per-row heights sized to their tallest wrapped cell and the header
//! row re-drawn at the top of every page the table spans.

use regex::Regex;

use crate::model::ContentBlock;
use crate::normalize::CANONICAL_BULLET;

/// Text drawing style passed to the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfTextStyle {
    /// Font size in points.
    pub size: f32,
    /// Bold face.
    pub bold: bool,
}

/// Rectangle drawing style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectStyle {
    /// Outline only.
    Stroke,
    /// Filled.
    Fill,
}

/// Low-level PDF drawing interface the layout loop drives.
///
/// Coordinates are top-down: y grows toward the bottom of the page,
/// and content lives between `margin()` and `page_height() - margin()`.
pub trait PdfCanvas {
    /// Page width in points.
    fn page_width(&self) -> f32;

    /// Page height in points.
    fn page_height(&self) -> f32;

    /// Uniform page margin in points.
    fn margin(&self) -> f32;

    /// Wrap `text` to fit `max_width` at the given size, returning the
    /// resulting lines.
    fn measure_wrapped_lines(&self, text: &str, max_width: f32, size: f32) -> Vec<String>;

    /// Draw one line of text with its top-left corner at (x, y).
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &PdfTextStyle);

    /// Draw a rectangle.
    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, style: RectStyle);

    /// Start a new page; subsequent drawing lands on it.
    fn add_page(&mut self);
}

/// Tunables for the layout loop.
#[derive(Debug, Clone)]
pub struct PdfLayoutOptions {
    /// Body font size in points
    pub body_size: f32,

    /// Heading font size in points
    pub heading_size: f32,

    /// Line height for body text in points
    pub line_height: f32,

    /// Minimum table row height in points
    pub min_row_height: f32,

    /// Padding inside table cells in points
    pub cell_padding: f32,

    /// Vertical gap between paragraphs in points
    pub paragraph_gap: f32,
}

impl Default for PdfLayoutOptions {
    fn default() -> Self {
        Self {
            body_size: 11.0,
            heading_size: 14.0,
            line_height: 16.0,
            min_row_height: 24.0,
            cell_padding: 4.0,
            paragraph_gap: 8.0,
        }
    }
}

/// Drives a [`PdfCanvas`] from an ordered block sequence.
pub struct PdfLayout<'a, C: PdfCanvas> {
    canvas: &'a mut C,
    options: PdfLayoutOptions,
    cursor_y: f32,
    heading_shape: Regex,
}

impl<'a, C: PdfCanvas> PdfLayout<'a, C> {
    /// Create a layout over the given canvas.
    pub fn new(canvas: &'a mut C, options: PdfLayoutOptions) -> Self {
        let cursor_y = canvas.margin();
        Self {
            canvas,
            options,
            cursor_y,
            heading_shape: Regex::new(r"[A-Za-z]").unwrap(),
        }
    }

    /// Render all blocks in order.
    pub fn render(&mut self, blocks: &[ContentBlock]) {
        for block in blocks {
            match block {
                ContentBlock::Text { text } => self.render_text(text),
                ContentBlock::Table { headers, rows } => self.render_table(headers, rows),
            }
        }
    }

    fn content_width(&self) -> f32 {
        self.canvas.page_width() - 2.0 * self.canvas.margin()
    }

    fn bottom(&self) -> f32 {
        self.canvas.page_height() - self.canvas.margin()
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.cursor_y + needed > self.bottom() {
            self.canvas.add_page();
            self.cursor_y = self.canvas.margin();
        }
    }

    fn render_text(&mut self, text: &str) {
        let width = self.content_width();
        for line in text.lines() {
            let trimmed = line.trim_end();
            if trimmed.trim().is_empty() {
                self.cursor_y += self.options.paragraph_gap;
                continue;
            }

            let heading = self.is_heading_shaped(trimmed.trim());
            let style = PdfTextStyle {
                size: if heading {
                    self.options.heading_size
                } else {
                    self.options.body_size
                },
                bold: heading,
            };
            let line_height =
                self.options.line_height * style.size / self.options.body_size;

            for wrapped in self.canvas.measure_wrapped_lines(trimmed, width, style.size) {
                self.ensure_space(line_height);
                let x = self.canvas.margin();
                let y = self.cursor_y;
                self.canvas.draw_text(&wrapped, x, y, &style);
                self.cursor_y += line_height;
            }
        }
        self.cursor_y += self.options.paragraph_gap;
    }

    fn is_heading_shaped(&self, line: &str) -> bool {
        !line.starts_with(CANONICAL_BULLET)
            && line.chars().count() <= 60
            && !line.ends_with(['.', '!', '?', ':', ',', ';'])
            && self.heading_shape.is_match(line)
    }

    fn render_table(&mut self, headers: &[String], rows: &[Vec<String>]) {
        let cols = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(headers.len()))
            .max()
            .unwrap_or(0);
        if cols == 0 {
            return;
        }
        let col_width = self.content_width() / cols as f32;

        self.draw_row(headers, cols, col_width, true, None);
        for row in rows {
            self.draw_row(row, cols, col_width, false, Some(headers));
        }
        self.cursor_y += self.options.paragraph_gap;
    }

    /// Draw one bordered row. When the row does not fit the page, a
    /// new page starts and `repeat_header` (if any) is drawn first.
    fn draw_row(
        &mut self,
        cells: &[String],
        cols: usize,
        col_width: f32,
        is_header: bool,
        repeat_header: Option<&[String]>,
    ) {
        let padding = self.options.cell_padding;
        let cell_width = col_width - 2.0 * padding;

        let wrapped: Vec<Vec<String>> = (0..cols)
            .map(|i| {
                let text = cells.get(i).map(String::as_str).unwrap_or("");
                self.canvas
                    .measure_wrapped_lines(text, cell_width, self.options.body_size)
            })
            .collect();

        let tallest = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let row_height = (tallest as f32 * self.options.line_height + 2.0 * padding)
            .max(self.options.min_row_height);

        if self.cursor_y + row_height > self.bottom() {
            self.canvas.add_page();
            self.cursor_y = self.canvas.margin();
            if let Some(header) = repeat_header {
                self.draw_row(header, cols, col_width, true, None);
            }
        }

        let style = PdfTextStyle {
            size: self.options.body_size,
            bold: is_header,
        };
        let margin = self.canvas.margin();
        for (i, lines) in wrapped.iter().enumerate() {
            let x = margin + i as f32 * col_width;
            self.canvas
                .draw_rect(x, self.cursor_y, col_width, row_height, RectStyle::Stroke);
            for (j, line) in lines.iter().enumerate() {
                self.canvas.draw_text(
                    line,
                    x + padding,
                    self.cursor_y + padding + j as f32 * self.options.line_height,
                    &style,
                );
            }
        }
        self.cursor_y += row_height;
    }
}
