//! Integration tests for the PDF export path.

use unsummary::{
    ContentBlock, PdfCanvas, PdfLayout, PdfLayoutOptions, PdfTextStyle, RectStyle, SummaryFormat,
    SummaryPipeline, EMPTY_PLACEHOLDER,
};

/// Canvas stub recording draw operations.
#[derive(Default)]
struct RecordingCanvas {
    texts: Vec<(String, bool)>,
    rects: usize,
    pages: usize,
}

impl PdfCanvas for RecordingCanvas {
    fn page_width(&self) -> f32 {
        612.0
    }

    fn page_height(&self) -> f32 {
        792.0
    }

    fn margin(&self) -> f32 {
        48.0
    }

    fn measure_wrapped_lines(&self, text: &str, max_width: f32, size: f32) -> Vec<String> {
        let per_line = ((max_width / (size * 0.5)) as usize).max(8);
        let mut lines = Vec::new();
        let mut current = String::new();
        for word in text.split_whitespace() {
            if !current.is_empty() && current.len() + 1 + word.len() > per_line {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }

    fn draw_text(&mut self, text: &str, _x: f32, _y: f32, style: &PdfTextStyle) {
        self.texts.push((text.to_string(), style.bold));
    }

    fn draw_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _style: RectStyle) {
        self.rects += 1;
    }

    fn add_page(&mut self) {
        self.pages += 1;
    }
}

#[test]
fn smart_document_renders_text_and_table() {
    let raw = "\
1. Overview
The brain is the control center.

Part  Function
Cerebrum  Thinking
Cerebellum  Balance";

    let pipeline = SummaryPipeline::new();
    let blocks = pipeline.pdf_blocks(raw, SummaryFormat::Smart);
    assert!(blocks.iter().any(ContentBlock::is_table));

    let mut canvas = RecordingCanvas::default();
    PdfLayout::new(&mut canvas, PdfLayoutOptions::default()).render(&blocks);

    // Heading drawn bold, prose drawn regular.
    assert!(canvas.texts.contains(&("Overview".to_string(), true)));
    assert!(canvas
        .texts
        .iter()
        .any(|(t, bold)| t.contains("control center") && !bold));

    // One bordered cell per header and body cell.
    assert_eq!(canvas.rects, 6);

    // Header cells bold, body cells regular.
    assert!(canvas.texts.contains(&("Part".to_string(), true)));
    assert!(canvas.texts.contains(&("Cerebrum".to_string(), false)));
}

#[test]
fn empty_document_renders_placeholder() {
    let pipeline = SummaryPipeline::new();
    let blocks = pipeline.pdf_blocks("", SummaryFormat::Paragraph);
    assert_eq!(blocks, vec![ContentBlock::text(EMPTY_PLACEHOLDER)]);

    let mut canvas = RecordingCanvas::default();
    PdfLayout::new(&mut canvas, PdfLayoutOptions::default()).render(&blocks);
    assert!(canvas
        .texts
        .iter()
        .any(|(t, _)| t == EMPTY_PLACEHOLDER));
}

#[test]
fn bullets_format_blocks_carry_canonical_glyph() {
    let pipeline = SummaryPipeline::new();
    let blocks = pipeline.pdf_blocks("- one\n* two\n1. three", SummaryFormat::Bullets);

    assert_eq!(blocks.len(), 1);
    match &blocks[0] {
        ContentBlock::Text { text } => {
            assert_eq!(text, "• one\n• two\n• three");
        }
        _ => panic!("expected a text block"),
    }
}
