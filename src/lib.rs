//! # unsummary
//!
//! Structure recovery and multi-target rendering for noisy
//! AI-generated study text.
//!
//! Summary content arrives as loosely-structured text: markdown
//! fragments, decimal outlines, whitespace-aligned pseudo-tables,
//! inline bold/italic noise. This library recovers a reliable document
//! structure from it and re-emits that structure to three targets: an
//! HTML preview, a semantically enhanced smart view (badge rows, fact
//! lists), and an ordered block sequence for paginated PDF drawing.
//!
//! ## Quick Start
//!
//! ```
//! use unsummary::{SummaryFormat, SummaryPipeline};
//!
//! let pipeline = SummaryPipeline::new();
//! let raw = "1. Overview\nThe brain coordinates every system in the body.";
//!
//! // HTML preview (smart path: rewrite → render → enhance → sanitize)
//! let html = pipeline.render_html(raw, SummaryFormat::Smart)?;
//! assert!(html.contains("<h2>Overview</h2>"));
//!
//! // Plain path: titled sections for the UI
//! let sections = pipeline.sections(raw, SummaryFormat::Paragraph);
//! assert_eq!(sections[0].title, "Overview");
//!
//! // PDF path: ordered text/table blocks
//! let blocks = pipeline.pdf_blocks(raw, SummaryFormat::Smart);
//! assert!(!blocks.is_empty());
//! # Ok::<(), unsummary::Error>(())
//! ```
//!
//! ## Design
//!
//! - **Heuristic, never failing**: malformed input degrades to literal
//!   pass-through or a placeholder, not an error.
//! - **Derived, stateless**: every value is recomputed from the raw
//!   input on each call; all passes are idempotent.
//! - **Injected primitives**: the markdown engine and HTML sanitizer
//!   are trait objects handed to the pipeline, with defaults backed by
//!   pulldown-cmark and a conservative allowlist pass.

pub mod error;
pub mod format;
pub mod html;
pub mod model;
pub mod normalize;
pub mod pdf;
pub mod pipeline;
pub mod rewrite;
pub mod structure;

// Re-export commonly used types
pub use error::{Error, Result};
pub use format::SummaryFormat;
pub use html::{BasicSanitizer, HtmlEnhancer, HtmlSanitizer, MarkdownEngine, PulldownEngine};
pub use model::{BulletItem, ContentBlock, Section, TableBlock, CELL_PLACEHOLDER};
pub use normalize::{
    normalize, normalize_cornell, CornellNormalizer, InlineCleaner, ListMarkerNormalizer,
    NormalizeOptions, TextNormalizer, CANONICAL_BULLET,
};
pub use pdf::{
    blocks_or_placeholder, extract_blocks, PdfBlockExtractor, PdfCanvas, PdfLayout,
    PdfLayoutOptions, PdfTextStyle, RectStyle, EMPTY_PLACEHOLDER,
};
pub use pipeline::SummaryPipeline;
pub use rewrite::{rewrite_smart, SmartMarkdownRewriter};
pub use structure::{parse_hierarchy, split_sections, BulletHierarchyParser, SectionSplitter};

/// JSON output flavor for structured exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Human-readable, indented
    Pretty,
    /// Single-line
    #[default]
    Compact,
}

/// Serialize recovered structure (sections, bullet items, blocks) to
/// JSON for consumers outside this core.
///
/// # Example
///
/// ```
/// use unsummary::{split_sections, to_json, JsonFormat};
///
/// let sections = split_sections("Overview\nThe brain runs the show.");
/// let json = to_json(&sections, JsonFormat::Compact).unwrap();
/// assert!(json.contains("\"title\":\"Overview\""));
/// ```
pub fn to_json<T: serde::Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

/// Render raw summary text to sanitized preview HTML with the default
/// pipeline.
pub fn to_html(raw: &str, format: SummaryFormat) -> Result<String> {
    SummaryPipeline::new().render_html(raw, format)
}

/// Extract ordered PDF blocks with the default pipeline, substituting
/// a placeholder for empty documents.
pub fn pdf_blocks(raw: &str, format: SummaryFormat) -> Vec<ContentBlock> {
    SummaryPipeline::new().pdf_blocks(raw, format)
}

/// Split raw text into titled sections with the default pipeline.
pub fn sections(raw: &str, format: SummaryFormat) -> Vec<Section> {
    SummaryPipeline::new().sections(raw, format)
}
