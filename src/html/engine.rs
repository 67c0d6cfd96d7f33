//! Injected rendering primitives.
//!
//! The pipeline does not own a markdown engine or a sanitizer; it is
//! handed both through these traits so the core stays testable without
//! a browser runtime. Default implementations back onto pulldown-cmark
//! and a conservative allowlist pass.

use pulldown_cmark::{html, Event, Options, Parser};
use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};

use crate::error::Result;
use super::tree::escape_html;

/// Markdown-to-HTML primitive consumed by the HTML path.
pub trait MarkdownEngine {
    /// Render canonical markdown to HTML (GFM tables on, soft line
    /// breaks treated as hard breaks).
    fn render(&self, markdown: &str) -> Result<String>;
}

/// HTML sanitizer primitive. Must be applied to all enhancer output
/// before it reaches a page.
pub trait HtmlSanitizer {
    /// Sanitize an HTML fragment.
    fn sanitize(&self, html: &str) -> Result<String>;
}

/// Default markdown engine backed by pulldown-cmark.
pub struct PulldownEngine {
    options: Options,
}

impl PulldownEngine {
    /// Create an engine with GFM tables and strikethrough enabled.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        Self { options }
    }
}

impl Default for PulldownEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownEngine for PulldownEngine {
    fn render(&self, markdown: &str) -> Result<String> {
        // The upstream contract is `breaks: true`: single newlines
        // inside a paragraph become <br>.
        let parser = Parser::new_ext(markdown, self.options).map(|event| match event {
            Event::SoftBreak => Event::HardBreak,
            other => other,
        });
        let mut out = String::new();
        html::push_html(&mut out, parser);
        Ok(out)
    }
}

/// Tags the sanitizer lets through.
const ALLOWED_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "ul", "ol", "li", "blockquote", "strong", "em",
    "code", "pre", "table", "thead", "tbody", "tr", "th", "td", "a", "br", "hr", "span", "div",
    "section",
];

/// Attributes the sanitizer lets through.
const ALLOWED_ATTRS: &[&str] = &["class", "href", "colspan", "rowspan"];

/// Elements whose entire subtree is dropped.
const DROPPED_TAGS: &[&str] = &["script", "style", "iframe", "object", "embed"];

/// Default sanitizer: an allowlist pass over a parsed fragment.
///
/// Unknown elements are unwrapped (their children survive), dangerous
/// subtrees are dropped, attributes outside the allowlist are removed,
/// and `href` values must carry a safe scheme.
pub struct BasicSanitizer;

impl BasicSanitizer {
    /// Create the default sanitizer.
    pub fn new() -> Self {
        Self
    }

    fn write_node(&self, node: NodeRef<'_, Node>, out: &mut String) {
        match node.value() {
            Node::Text(text) => out.push_str(&escape_html(&text)),
            Node::Element(_) => {
                let Some(el) = ElementRef::wrap(node) else {
                    return;
                };
                let name = el.value().name();
                if DROPPED_TAGS.contains(&name) {
                    return;
                }
                if !ALLOWED_TAGS.contains(&name) {
                    // Unwrap: keep the children, lose the tag.
                    for child in node.children() {
                        self.write_node(child, out);
                    }
                    return;
                }
                out.push('<');
                out.push_str(name);
                for (attr, value) in el.value().attrs() {
                    if !ALLOWED_ATTRS.contains(&attr) {
                        continue;
                    }
                    if attr == "href" && !is_safe_href(value) {
                        continue;
                    }
                    out.push(' ');
                    out.push_str(attr);
                    out.push_str("=\"");
                    out.push_str(&escape_html(value));
                    out.push('"');
                }
                out.push('>');
                if name == "br" || name == "hr" {
                    return;
                }
                for child in node.children() {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
            _ => {
                for child in node.children() {
                    self.write_node(child, out);
                }
            }
        }
    }
}

impl Default for BasicSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlSanitizer for BasicSanitizer {
    fn sanitize(&self, html: &str) -> Result<String> {
        let doc = Html::parse_fragment(html);
        let mut out = String::new();
        self.write_node(doc.tree.root(), &mut out);
        Ok(out)
    }
}

fn is_safe_href(value: &str) -> bool {
    let lowered = value.trim().to_ascii_lowercase();
    lowered.starts_with("http://")
        || lowered.starts_with("https://")
        || lowered.starts_with("mailto:")
        || lowered.starts_with('#')
        || lowered.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulldown_renders_gfm_table() {
        let engine = PulldownEngine::new();
        let html = engine
            .render("| A | B |\n| --- | --- |\n| 1 | 2 |")
            .unwrap();
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>A</th>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_pulldown_breaks_mode() {
        let engine = PulldownEngine::new();
        let html = engine.render("line one\nline two").unwrap();
        assert!(html.contains("<br"));
    }

    #[test]
    fn test_sanitizer_drops_script() {
        let sanitizer = BasicSanitizer::new();
        let html = sanitizer
            .sanitize("<p>safe</p><script>alert(1)</script>")
            .unwrap();
        assert!(html.contains("<p>safe</p>"));
        assert!(!html.contains("script"));
        assert!(!html.contains("alert"));
    }

    #[test]
    fn test_sanitizer_strips_event_handlers() {
        let sanitizer = BasicSanitizer::new();
        let html = sanitizer
            .sanitize(r#"<p onclick="evil()" class="ok">text</p>"#)
            .unwrap();
        assert!(!html.contains("onclick"));
        assert!(html.contains(r#"class="ok""#));
    }

    #[test]
    fn test_sanitizer_rejects_javascript_href() {
        let sanitizer = BasicSanitizer::new();
        let html = sanitizer
            .sanitize(r#"<a href="javascript:evil()">x</a>"#)
            .unwrap();
        assert!(!html.contains("javascript"));
        assert!(html.contains("<a>x</a>"));
    }

    #[test]
    fn test_sanitizer_unwraps_unknown_tags() {
        let sanitizer = BasicSanitizer::new();
        let html = sanitizer.sanitize("<article><p>kept</p></article>").unwrap();
        assert_eq!(html, "<p>kept</p>");
    }
}
