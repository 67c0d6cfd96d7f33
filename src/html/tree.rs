//! Semantic output tree for the HTML enhancer.
//!
//! The enhancer never mutates the parsed input document. It builds
//! this small tree of sections and rows from an immutable parse, then
//! serializes it once — the order-of-mutation hazards of in-place DOM
//! editing cannot occur.

use std::fmt::Write as _;

/// A promoted key line: label badge plus title and optional detail.
#[derive(Debug, Clone)]
pub(crate) struct KeyRow {
    pub label: String,
    pub title: String,
    pub detail: Option<String>,
}

impl KeyRow {
    fn serialize(&self, out: &mut String) {
        let slug = self.label.to_lowercase().replace(' ', "-");
        let _ = write!(
            out,
            r#"<div class="key-row key-row-{slug}"><span class="key-label">{}:</span><span class="key-title">{}</span>"#,
            escape_html(&self.label),
            escape_html(&self.title),
        );
        if let Some(detail) = &self.detail {
            let _ = write!(out, r#"<span class="key-detail">{}</span>"#, escape_html(detail));
        }
        out.push_str("</div>");
    }
}

/// One list item in a rebuilt list.
#[derive(Debug, Clone)]
pub(crate) enum ListItem {
    /// Original inner HTML, passed through.
    Raw(String),
    /// Promoted badge row.
    KeyRow(KeyRow),
    /// Example item, rendered as a blockquote.
    Example(String),
}

/// A rebuilt list.
#[derive(Debug, Clone)]
pub(crate) struct ListNode {
    pub ordered: bool,
    /// Set on the facts list to override framework-level list-marker
    /// suppression with explicit markers.
    pub explicit_markers: bool,
    pub items: Vec<ListItem>,
}

impl ListNode {
    fn serialize(&self, out: &mut String) {
        let tag = if self.ordered { "ol" } else { "ul" };
        if self.explicit_markers {
            let _ = write!(out, r#"<{tag} class="facts-list">"#);
        } else {
            let _ = write!(out, "<{tag}>");
        }
        for item in &self.items {
            out.push_str("<li>");
            match item {
                ListItem::Raw(inner) => out.push_str(inner),
                ListItem::KeyRow(row) => row.serialize(out),
                ListItem::Example(text) => serialize_example(text, out),
            }
            out.push_str("</li>");
        }
        let _ = write!(out, "</{tag}>");
    }
}

/// One rendered child of a section.
#[derive(Debug, Clone)]
pub(crate) enum Rendered {
    /// Original outer HTML, passed through.
    Raw(String),
    /// A plain paragraph, kept with its `<br>`-split text parts so the
    /// facts pass can rebuild it as list items.
    Paragraph { html: String, parts: Vec<String> },
    /// Promoted badge row.
    KeyRow(KeyRow),
    /// Example line, rendered as a blockquote.
    Example(String),
    /// A rebuilt list.
    List(ListNode),
}

impl Rendered {
    pub(crate) fn serialize(&self, out: &mut String) {
        match self {
            Rendered::Raw(html) | Rendered::Paragraph { html, .. } => out.push_str(html),
            Rendered::KeyRow(row) => row.serialize(out),
            Rendered::Example(text) => serialize_example(text, out),
            Rendered::List(list) => list.serialize(out),
        }
    }

    pub(crate) fn paragraph_text(&self) -> Option<String> {
        match self {
            Rendered::Paragraph { parts, .. } => Some(parts.join(" ")),
            _ => None,
        }
    }
}

/// A heading-delimited slice of the document.
#[derive(Debug, Clone, Default)]
pub(crate) struct SectionNode {
    /// The heading's original outer HTML (`None` for the implicit lead
    /// section before the first heading).
    pub heading_html: Option<String>,
    /// The heading's plain text, for section identification.
    pub heading_text: String,
    pub children: Vec<Rendered>,
}

impl SectionNode {
    pub(crate) fn serialize(&self, out: &mut String) {
        if self.heading_html.is_none() && self.children.is_empty() {
            return;
        }
        out.push_str("<section>");
        if let Some(heading) = &self.heading_html {
            out.push_str(heading);
        }
        for child in &self.children {
            child.serialize(out);
        }
        out.push_str("</section>");
    }
}

fn serialize_example(text: &str, out: &mut String) {
    let _ = write!(
        out,
        r#"<blockquote class="example-quote"><strong>Example:</strong> {}</blockquote>"#,
        escape_html(text)
    );
}

/// Minimal HTML escaping for text and attribute values.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_row_serialization() {
        let row = KeyRow {
            label: "Key Concept".to_string(),
            title: "Boss of Your Body".to_string(),
            detail: Some("The brain coordinates everything.".to_string()),
        };
        let mut out = String::new();
        row.serialize(&mut out);
        assert!(out.contains(r#"class="key-row key-row-key-concept""#));
        assert!(out.contains(r#"<span class="key-label">Key Concept:</span>"#));
        assert!(out.contains(r#"<span class="key-title">Boss of Your Body</span>"#));
        assert!(out.contains("The brain coordinates everything."));
    }

    #[test]
    fn test_facts_list_class() {
        let list = ListNode {
            ordered: false,
            explicit_markers: true,
            items: vec![ListItem::Raw("one".to_string())],
        };
        let mut out = String::new();
        list.serialize(&mut out);
        assert_eq!(out, r#"<ul class="facts-list"><li>one</li></ul>"#);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }
}
