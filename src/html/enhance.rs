//! Post-render HTML enhancement.
//!
//! Takes the HTML produced from canonical markdown and regroups it:
//! each `h1`/`h2` opens a `<section>` that absorbs its following
//! siblings, key-value lines are promoted to labeled badge rows, and
//! the facts section is forced into explicit list markup. The input
//! document is parsed once and never mutated; output is built as a
//! fresh semantic tree and serialized in one pass.

use regex::Regex;
use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};

use super::tree::{escape_html, KeyRow, ListItem, ListNode, Rendered, SectionNode};

/// Normalized title of the section that must render as a list.
const FACTS_TITLE: &str = "additional interesting facts";

/// Tags whose key-value text is eligible for badge promotion.
const PROMOTABLE_TAGS: &[&str] = &["p", "h3", "h4", "h5", "h6", "blockquote"];

/// Regroups rendered HTML into sections and promotes key rows.
pub struct HtmlEnhancer {
    key_line: Regex,
    camel_join: Regex,
}

impl HtmlEnhancer {
    /// Create an enhancer with its patterns compiled.
    pub fn new() -> Self {
        Self {
            key_line: Regex::new(r"(?i)^\s*(key concept|definition|example|figure):\s*").unwrap(),
            camel_join: Regex::new(r"([a-z])([A-Z])").unwrap(),
        }
    }

    /// Enhance an HTML fragment. Never fails: unrecognized structures
    /// pass through untouched.
    pub fn enhance(&self, html: &str) -> String {
        let doc = Html::parse_fragment(html);
        let top = top_level_nodes(&doc);

        let mut lead = SectionNode::default();
        let mut sections: Vec<SectionNode> = Vec::new();

        let mut i = 0;
        while i < top.len() {
            let node = top[i];
            let Some(el) = ElementRef::wrap(node) else {
                if let Node::Text(text) = node.value() {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        let target = target_section(&mut sections, &mut lead);
                        target.children.push(Rendered::Raw(escape_html(trimmed)));
                    }
                }
                i += 1;
                continue;
            };

            let name = el.value().name();
            if name == "h1" || name == "h2" {
                sections.push(SectionNode {
                    heading_html: Some(el.html()),
                    heading_text: element_text(el),
                    children: Vec::new(),
                });
                i += 1;
                continue;
            }

            let mut rendered = self.render_block(el);

            // A badge row with no detail absorbs the immediately
            // following plain paragraph (whitespace-only text nodes
            // between rendered elements do not count as content).
            let mut consumed = 1;
            if let Rendered::KeyRow(row) = &mut rendered {
                if row.detail.is_none() {
                    let mut j = i + 1;
                    while j < top.len() && is_blank_text(top[j]) {
                        j += 1;
                    }
                    if let Some(next) = top.get(j).copied().and_then(ElementRef::wrap) {
                        if next.value().name() == "p" {
                            let text = element_text(next);
                            if !text.is_empty() && !self.key_line.is_match(&text) {
                                row.detail = Some(text);
                                consumed = j + 1 - i;
                            }
                        }
                    }
                }
            }

            let target = target_section(&mut sections, &mut lead);
            target.children.push(rendered);
            i += consumed;
        }

        self.apply_facts_rule(&mut lead);
        for section in &mut sections {
            self.apply_facts_rule(section);
        }

        let mut out = String::new();
        // Content before the first heading stays outside any section.
        for child in &lead.children {
            child.serialize(&mut out);
        }
        for section in &sections {
            section.serialize(&mut out);
        }
        out
    }

    fn render_block(&self, el: ElementRef<'_>) -> Rendered {
        let name = el.value().name();
        if PROMOTABLE_TAGS.contains(&name) {
            let parts = split_text_at_br(el);
            if let Some(first) = parts.first() {
                if let Some(caps) = self.key_line.captures(first) {
                    let label = canonical_label(&caps[1]);
                    let after = first[caps.get(0).map_or(0, |m| m.end())..].trim().to_string();
                    if label == "Example" {
                        let mut text = after;
                        for part in &parts[1..] {
                            text.push(' ');
                            text.push_str(part);
                        }
                        return Rendered::Example(text.trim().to_string());
                    }
                    return Rendered::KeyRow(self.build_key_row(label, after, &parts[1..]));
                }
            }
            if name == "p" {
                return Rendered::Paragraph {
                    html: el.html(),
                    parts,
                };
            }
            return Rendered::Raw(el.html());
        }

        if name == "ul" || name == "ol" {
            return Rendered::List(self.render_list(el));
        }

        Rendered::Raw(el.html())
    }

    fn render_list(&self, el: ElementRef<'_>) -> ListNode {
        let mut items = Vec::new();
        for child in el.children() {
            let Some(li) = ElementRef::wrap(child) else {
                continue;
            };
            if li.value().name() != "li" {
                continue;
            }
            items.push(self.render_list_item(li));
        }
        ListNode {
            ordered: el.value().name() == "ol",
            explicit_markers: false,
            items,
        }
    }

    fn render_list_item(&self, li: ElementRef<'_>) -> ListItem {
        // A second <p> inside the item serves as the detail when no
        // <br> splits the text.
        let paragraphs: Vec<ElementRef<'_>> = li
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "p")
            .collect();

        let (parts, detail_from_p) = if paragraphs.len() >= 2 {
            (
                split_text_at_br(paragraphs[0]),
                Some(element_text(paragraphs[1])),
            )
        } else {
            (split_text_at_br(li), None)
        };

        let Some(first) = parts.first() else {
            return ListItem::Raw(li.inner_html());
        };
        let Some(caps) = self.key_line.captures(first) else {
            return ListItem::Raw(li.inner_html());
        };

        let label = canonical_label(&caps[1]);
        let after = first[caps.get(0).map_or(0, |m| m.end())..].trim().to_string();
        if label == "Example" {
            let mut text = after;
            for part in &parts[1..] {
                text.push(' ');
                text.push_str(part);
            }
            if let Some(extra) = detail_from_p {
                text.push(' ');
                text.push_str(&extra);
            }
            return ListItem::Example(text.trim().to_string());
        }

        let mut row = self.build_key_row(label, after, &parts[1..]);
        if row.detail.is_none() {
            row.detail = detail_from_p.filter(|d| !d.is_empty());
        }
        ListItem::KeyRow(row)
    }

    fn build_key_row(&self, label: String, first_line: String, rest: &[String]) -> KeyRow {
        // Upstream extraction sometimes collapses the line break after
        // a "Key Concept" title, joining it onto the detail sentence.
        let (title, carried) = if label == "Key Concept" {
            match self.camel_join.find(&first_line) {
                Some(m) => {
                    let split_at = m.start() + 1;
                    (
                        first_line[..split_at].trim().to_string(),
                        Some(first_line[split_at..].trim().to_string()),
                    )
                }
                None => (first_line, None),
            }
        } else {
            (first_line, None)
        };

        let mut detail_parts: Vec<String> = Vec::new();
        if let Some(carried) = carried {
            if !carried.is_empty() {
                detail_parts.push(carried);
            }
        }
        detail_parts.extend(rest.iter().filter(|p| !p.is_empty()).cloned());

        let detail = if detail_parts.is_empty() {
            None
        } else {
            Some(detail_parts.join(" "))
        };

        KeyRow {
            label,
            title,
            detail,
        }
    }

    fn apply_facts_rule(&self, section: &mut SectionNode) {
        let heading_is_facts = normalize_title(&section.heading_text) == FACTS_TITLE;
        let first_para_is_facts = section
            .children
            .iter()
            .find_map(Rendered::paragraph_text)
            .map(|t| normalize_title(&t) == FACTS_TITLE)
            .unwrap_or(false);
        if !heading_is_facts && !first_para_is_facts {
            return;
        }

        let has_list = section
            .children
            .iter()
            .any(|c| matches!(c, Rendered::List(_)));
        if has_list {
            for child in &mut section.children {
                if let Rendered::List(list) = child {
                    list.explicit_markers = true;
                }
            }
            return;
        }

        log::debug!("facts section without list markup, synthesizing <ul>");
        let mut items: Vec<ListItem> = Vec::new();
        let mut replaced: Vec<Rendered> = Vec::new();
        let mut first_paragraph = true;
        let mut list_emitted = false;
        for child in section.children.drain(..) {
            match child {
                Rendered::Paragraph { parts, .. } => {
                    let text = parts.join(" ");
                    let duplicate_heading =
                        first_paragraph && normalize_title(&text) == FACTS_TITLE;
                    first_paragraph = false;
                    if duplicate_heading {
                        continue;
                    }
                    for part in parts {
                        let trimmed = part.trim();
                        if !trimmed.is_empty() {
                            items.push(ListItem::Raw(escape_html(trimmed)));
                        }
                    }
                    if !list_emitted {
                        // Placeholder position; the list body fills in
                        // after the drain completes.
                        replaced.push(Rendered::List(ListNode {
                            ordered: false,
                            explicit_markers: true,
                            items: Vec::new(),
                        }));
                        list_emitted = true;
                    }
                }
                other => replaced.push(other),
            }
        }
        if let Some(Rendered::List(list)) = replaced
            .iter_mut()
            .find(|c| matches!(c, Rendered::List(_)))
        {
            list.items = items;
        }
        section.children = replaced;
    }
}

impl Default for HtmlEnhancer {
    fn default() -> Self {
        Self::new()
    }
}

/// Enhance an HTML fragment with a default enhancer.
pub fn enhance_html(html: &str) -> String {
    HtmlEnhancer::new().enhance(html)
}

fn is_blank_text(node: NodeRef<'_, Node>) -> bool {
    match node.value() {
        Node::Text(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn target_section<'a>(
    sections: &'a mut Vec<SectionNode>,
    lead: &'a mut SectionNode,
) -> &'a mut SectionNode {
    match sections.last_mut() {
        Some(section) => section,
        None => lead,
    }
}

fn top_level_nodes(doc: &Html) -> Vec<NodeRef<'_, Node>> {
    // parse_fragment wraps content in a synthetic <html> element.
    let root = doc.tree.root();
    for child in root.children() {
        if let Some(el) = ElementRef::wrap(child) {
            if el.value().name() == "html" {
                return child.children().collect();
            }
        }
    }
    root.children().collect()
}

fn element_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

/// Collect an element's text, starting a new part at every `<br>`.
fn split_text_at_br(el: ElementRef<'_>) -> Vec<String> {
    let mut parts = vec![String::new()];
    collect_parts(*el, &mut parts);
    parts
        .into_iter()
        .map(|p| collapse_whitespace(&p))
        .filter(|p| !p.is_empty())
        .collect()
}

fn collect_parts(node: NodeRef<'_, Node>, parts: &mut Vec<String>) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => {
                if let Some(last) = parts.last_mut() {
                    last.push_str(&text);
                }
            }
            Node::Element(el) if el.name() == "br" => parts.push(String::new()),
            Node::Element(_) => collect_parts(child, parts),
            _ => {}
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn canonical_label(raw: &str) -> String {
    match raw.to_lowercase().as_str() {
        "key concept" => "Key Concept".to_string(),
        "definition" => "Definition".to_string(),
        "example" => "Example".to_string(),
        "figure" => "Figure".to_string(),
        other => other.to_string(),
    }
}

fn normalize_title(text: &str) -> String {
    let kept: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    collapse_whitespace(&kept).to_lowercase()
}
