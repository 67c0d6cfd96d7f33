//! Format dispatch and end-to-end rendering.

use crate::error::Result;
use crate::format::SummaryFormat;
use crate::html::{BasicSanitizer, HtmlEnhancer, HtmlSanitizer, MarkdownEngine, PulldownEngine};
use crate::model::{BulletItem, ContentBlock, Section};
use crate::normalize::{CornellNormalizer, NormalizeOptions, TextNormalizer};
use crate::pdf::{PdfBlockExtractor, EMPTY_PLACEHOLDER};
use crate::rewrite::SmartMarkdownRewriter;
use crate::structure::{BulletHierarchyParser, SectionSplitter};

/// The whole recovery pipeline with its injected primitives.
///
/// The markdown engine and sanitizer are dependencies, not globals, so
/// the pipeline stays testable without a browser runtime. Every method
/// is a pure recomputation over the raw input; nothing is cached or
/// mutated between calls.
///
/// # Example
///
/// ```
/// use unsummary::{SummaryFormat, SummaryPipeline};
///
/// let pipeline = SummaryPipeline::new();
/// let html = pipeline
///     .render_html("1. Overview\nThe brain runs the show.", SummaryFormat::Smart)
///     .unwrap();
/// assert!(html.contains("<section>"));
/// ```
pub struct SummaryPipeline<M = PulldownEngine, S = BasicSanitizer>
where
    M: MarkdownEngine,
    S: HtmlSanitizer,
{
    engine: M,
    sanitizer: S,
    normalizer: TextNormalizer,
    cornell: CornellNormalizer,
    rewriter: SmartMarkdownRewriter,
    splitter: SectionSplitter,
    hierarchy: BulletHierarchyParser,
    enhancer: HtmlEnhancer,
    extractor: PdfBlockExtractor,
}

impl SummaryPipeline {
    /// Create a pipeline with the default primitives.
    pub fn new() -> Self {
        Self::with_primitives(PulldownEngine::new(), BasicSanitizer::new())
    }
}

impl Default for SummaryPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, S> SummaryPipeline<M, S>
where
    M: MarkdownEngine,
    S: HtmlSanitizer,
{
    /// Create a pipeline around explicit markdown/sanitizer primitives.
    pub fn with_primitives(engine: M, sanitizer: S) -> Self {
        Self {
            engine,
            sanitizer,
            normalizer: TextNormalizer::default(),
            cornell: CornellNormalizer::new(),
            rewriter: SmartMarkdownRewriter::new(),
            splitter: SectionSplitter::new(),
            hierarchy: BulletHierarchyParser::new(),
            enhancer: HtmlEnhancer::new(),
            extractor: PdfBlockExtractor::new(),
        }
    }

    /// Replace the normalization options.
    pub fn with_normalize_options(mut self, options: NormalizeOptions) -> Self {
        self.normalizer = TextNormalizer::new(options.clone());
        self.cornell = CornellNormalizer::with_options(options);
        self
    }

    /// Route raw text through the front-end its format selects: the
    /// smart rewriter, the Cornell flattener, or the general
    /// normalizer. The result feeds every downstream target.
    pub fn prepare(&self, raw: &str, format: SummaryFormat) -> String {
        match format {
            SummaryFormat::Smart => self.rewriter.rewrite(raw),
            SummaryFormat::Cornell => self.cornell.normalize(raw),
            SummaryFormat::Bullets | SummaryFormat::Paragraph => self.normalizer.normalize(raw),
        }
    }

    /// Render the HTML preview.
    ///
    /// The smart format runs the full path (rewrite → engine →
    /// enhancer → sanitizer). Other formats render their normalized
    /// text through the engine and sanitizer without enhancement; the
    /// plain-path structure accessors ([`Self::sections`],
    /// [`Self::bullet_hierarchy`]) are the primary surface for them.
    pub fn render_html(&self, raw: &str, format: SummaryFormat) -> Result<String> {
        let prepared = self.prepare(raw, format);
        let rendered = self.engine.render(&prepared)?;
        let enhanced = match format {
            SummaryFormat::Smart => self.enhancer.enhance(&rendered),
            _ => rendered,
        };
        self.sanitizer.sanitize(&enhanced)
    }

    /// Split prepared text into titled sections (the plain path).
    pub fn sections(&self, raw: &str, format: SummaryFormat) -> Vec<Section> {
        self.splitter.split(&self.prepare(raw, format))
    }

    /// Group a bulleted document into a two-level hierarchy (the
    /// bullets format).
    pub fn bullet_hierarchy(&self, raw: &str) -> Vec<BulletItem> {
        self.hierarchy.parse(&self.normalizer.normalize(raw))
    }

    /// Extract the ordered PDF block sequence for the given format,
    /// substituting a placeholder block for empty documents.
    pub fn pdf_blocks(&self, raw: &str, format: SummaryFormat) -> Vec<ContentBlock> {
        let blocks = self.extractor.extract(&self.prepare(raw, format));
        if blocks.is_empty() {
            vec![ContentBlock::text(EMPTY_PLACEHOLDER)]
        } else {
            blocks
        }
    }
}
