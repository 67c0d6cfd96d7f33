//! Smart-format markdown reconstruction.
//!
//! The smart format arrives as free-form text: headings without
//! markers, pseudo-tables aligned with spaces, key-value lines, the
//! occasional stray markdown fragment. This pass rebuilds canonical
//! markdown (ATX headings, `-` lists, blockquotes, GFM tables) from
//! it. Dispatch is an ordered table of (predicate, handler) rules —
//! first match wins, each handler consumes one or more lines — so the
//! tie-break order stays auditable and testable per rule.
//!
//! The pass is idempotent: its own canonical output re-enters through
//! the pass-through rules (emitted headings, pipe rows, blockquotes)
//! and reproduces itself.

use regex::Regex;

use crate::model::TableBlock;
use crate::normalize::{InlineCleaner, ListMarkerNormalizer};

use super::ColumnInference;

/// Section titles the generator emits for smart summaries, lowercased,
/// trailing colon already stripped.
const KNOWN_TITLES: &[&str] = &[
    "summary",
    "key insights and core concepts",
    "brain structure and functions",
    "brain parts and functions",
    "additional interesting facts",
    "conclusions",
    "summary highlights",
];

/// The section whose content must always render as a list.
const FACTS_SECTION: &str = "additional interesting facts";

/// Key-value labels rendered as badge rows by the HTML enhancer; the
/// rewriter leaves them as plain `label: value` paragraphs.
const BADGE_LABELS: &[&str] = &["key concept", "definition", "insight", "fact", "figure"];

type RuleFn = fn(&SmartMarkdownRewriter, &mut Walker) -> bool;

/// Reconstructs canonical markdown from raw smart-summary text.
pub struct SmartMarkdownRewriter {
    inline: InlineCleaner,
    lists: ListMarkerNormalizer,
    infer: ColumnInference,
    wrapper_title: Regex,
    emitted_heading: Regex,
    numbered_heading: Regex,
    generic_heading: Regex,
    key_value: Regex,
    key_line_prefix: Regex,
}

impl SmartMarkdownRewriter {
    /// Ordered dispatch table. First matching rule consumes the
    /// current line (or a run of lines); the paragraph rule is total.
    const RULES: &'static [(&'static str, RuleFn)] = &[
        ("blank", Self::rule_blank),
        ("wrapper-title", Self::rule_wrapper_title),
        ("emitted-heading", Self::rule_emitted_heading),
        ("emitted-table", Self::rule_emitted_table),
        ("emitted-quote", Self::rule_emitted_quote),
        ("numbered-heading", Self::rule_numbered_heading),
        ("known-title", Self::rule_known_title),
        ("generic-heading", Self::rule_generic_heading),
        ("bullet", Self::rule_bullet),
        ("facts-list", Self::rule_facts_list),
        ("table", Self::rule_table),
        ("key-value", Self::rule_key_value),
        ("paragraph", Self::rule_paragraph),
    ];

    /// Create a rewriter with its patterns compiled.
    pub fn new() -> Self {
        Self {
            inline: InlineCleaner::new(),
            lists: ListMarkerNormalizer::new(),
            infer: ColumnInference::new(),
            wrapper_title: Regex::new(r"(?i)^smart\s*summary(:.*)?$").unwrap(),
            emitted_heading: Regex::new(r"^#{1,6}\s+(.+)$").unwrap(),
            numbered_heading: Regex::new(r"^\d+[.)]\s+(.+)$").unwrap(),
            generic_heading: Regex::new(r"^[A-Z][A-Za-z\s,&-]{3,60}:?$").unwrap(),
            key_value: Regex::new(r"^([A-Za-z][A-Za-z\s&/-]{1,40}):\s+(.+)$").unwrap(),
            key_line_prefix: Regex::new(r"(?i)^(key concept|definition|example|figure):").unwrap(),
        }
    }

    /// Rewrite raw smart-summary text into canonical markdown.
    pub fn rewrite(&self, raw: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }

        let mut walker = Walker::new(raw);
        while !walker.done() {
            for (name, rule) in Self::RULES {
                if rule(self, &mut walker) {
                    log::trace!("smart rewrite: rule {name} consumed line {}", walker.idx);
                    break;
                }
            }
        }
        walker.finish()
    }

    // Rule 1: blank lines are preserved as block separators. Runs
    // collapse to one so re-feeding the output (which adds its own
    // separation around headings and tables) stays stable.
    fn rule_blank(&self, w: &mut Walker) -> bool {
        if !w.current().trim().is_empty() {
            return false;
        }
        if !w.last_line().is_some_and(str::is_empty) {
            w.push(String::new());
        }
        w.advance();
        true
    }

    // Rule 2: the generator's wrapper title is never rendered.
    fn rule_wrapper_title(&self, w: &mut Walker) -> bool {
        let cleaned = self.inline.clean(w.current());
        if !self.wrapper_title.is_match(&cleaned) {
            return false;
        }
        w.advance();
        true
    }

    // Pass-through: a heading this pass already emitted.
    fn rule_emitted_heading(&self, w: &mut Walker) -> bool {
        let trimmed = w.current().trim();
        let Some(caps) = self.emitted_heading.captures(trimmed) else {
            return false;
        };
        let text = self.inline.clean(&caps[1]);
        w.set_section(&text);
        w.push_heading(&text);
        w.advance();
        true
    }

    // Pass-through: GFM pipe rows survive verbatim.
    fn rule_emitted_table(&self, w: &mut Walker) -> bool {
        let trimmed = w.current().trim();
        if trimmed.len() < 2 || !trimmed.starts_with('|') || !trimmed.ends_with('|') {
            return false;
        }
        w.push_pipe_row(trimmed);
        w.advance();
        true
    }

    // Pass-through: blockquotes re-enter the Example handling.
    fn rule_emitted_quote(&self, w: &mut Walker) -> bool {
        let trimmed = w.current().trim();
        let Some(rest) = trimmed.strip_prefix('>') else {
            return false;
        };
        let cleaned = self.inline.clean(rest);
        if let Some(caps) = self.key_value.captures(&cleaned) {
            if caps[1].trim().eq_ignore_ascii_case("example") {
                w.push(format!("> **Example:** {}", &caps[2]));
                w.advance();
                return true;
            }
        }
        w.push(format!("> {cleaned}"));
        w.advance();
        true
    }

    // Rule 3: numbered headings ("1. Overview", "2) Brain Parts").
    fn rule_numbered_heading(&self, w: &mut Walker) -> bool {
        let trimmed = w.current().trim();
        let Some(caps) = self.numbered_heading.captures(trimmed) else {
            return false;
        };
        let text = self.inline.clean(&caps[1]);
        w.set_section(&text);
        w.push_heading(&text);
        w.advance();
        true
    }

    // Rule 4: the fixed vocabulary of known section titles.
    fn rule_known_title(&self, w: &mut Walker) -> bool {
        let cleaned = self.inline.clean(w.current());
        let stripped = cleaned.strip_suffix(':').unwrap_or(&cleaned).trim();
        if !KNOWN_TITLES.contains(&stripped.to_lowercase().as_str()) {
            return false;
        }
        let text = stripped.to_string();
        w.set_section(&text);
        w.push_heading(&text);
        w.advance();
        true
    }

    // Rule 5: generic heading guess for topic-adaptive headings the
    // fixed vocabulary cannot anticipate ("Key Historical Events").
    fn rule_generic_heading(&self, w: &mut Walker) -> bool {
        let cleaned = self.inline.clean(w.current());
        if !self.generic_heading.is_match(&cleaned) {
            return false;
        }
        if cleaned.split_whitespace().count() > 8 {
            return false;
        }
        if self.key_line_prefix.is_match(&cleaned) {
            return false;
        }
        // Tie-break with rule 8: a line that column-parses together
        // with its lookahead is a table header, not a heading.
        if self.infer.looks_like_table_start(w.current().trim(), w.peek()) {
            log::debug!("heading guess declined, looks like a table: {cleaned:?}");
            return false;
        }
        let text = cleaned.strip_suffix(':').unwrap_or(&cleaned).trim().to_string();
        w.set_section(&text);
        w.push_heading(&text);
        w.advance();
        true
    }

    // Rule 6: list lines, canonical or raw.
    fn rule_bullet(&self, w: &mut Walker) -> bool {
        let Some((indent, rest)) = self.lists.split_marker(w.current()) else {
            return false;
        };
        let cleaned = self.inline.clean(rest);
        if cleaned.is_empty() {
            w.advance();
            return true;
        }
        let prefix = if indent >= 2 { "  " } else { "" };
        // Keep key-value bullets in their canonical bold-label form so
        // the output re-enters this rule unchanged.
        if let Some(caps) = self.key_value.captures(&cleaned) {
            let label = caps[1].trim();
            let lowered = label.to_lowercase();
            if !BADGE_LABELS.contains(&lowered.as_str()) && lowered != "example" {
                w.push(format!("{prefix}- **{label}:** {}", &caps[2]));
                w.advance();
                return true;
            }
        }
        w.push(format!("{prefix}- {cleaned}"));
        w.advance();
        true
    }

    // Rule 7: the facts section always renders as a list, marker or not.
    fn rule_facts_list(&self, w: &mut Walker) -> bool {
        if w.section.as_deref() != Some(FACTS_SECTION) {
            return false;
        }
        let cleaned = self.inline.clean(w.current());
        if !cleaned.is_empty() {
            w.push(format!("- {cleaned}"));
        }
        w.advance();
        true
    }

    // Rule 8: whitespace/keyword table inference.
    fn rule_table(&self, w: &mut Walker) -> bool {
        let trimmed = w.current().trim();
        if !self.infer.looks_like_table_start(trimmed, w.peek()) {
            return false;
        }
        let headers: Vec<String> = self
            .infer
            .parse_header(trimmed)
            .unwrap_or_default()
            .into_iter()
            .map(|cell| self.inline.clean(&cell))
            .collect();
        w.advance();

        let mut rows: Vec<Vec<String>> = Vec::new();
        while !w.done() {
            let line = w.current().trim();
            if line.is_empty() || self.numbered_heading.is_match(line) {
                break;
            }
            let Some(row) = self.infer.parse_row(line, headers.len()) else {
                break;
            };
            rows.push(row.into_iter().map(|cell| self.inline.clean(&cell)).collect());
            w.advance();
        }

        log::debug!("inferred table: {} columns, {} rows", headers.len(), rows.len());
        let mut table = TableBlock::new(headers, rows);
        table.normalize_columns();
        w.push_table(&table);
        true
    }

    // Rule 9: key-value lines.
    fn rule_key_value(&self, w: &mut Walker) -> bool {
        let cleaned = self.inline.clean(w.current());
        let Some(caps) = self.key_value.captures(&cleaned) else {
            return false;
        };
        let label = caps[1].trim();
        let value = &caps[2];
        let lowered = label.to_lowercase();
        if BADGE_LABELS.contains(&lowered.as_str()) {
            // Left as a plain paragraph for the HTML enhancer to badge.
            w.push_paragraph(format!("{label}: {value}"));
        } else if lowered == "example" {
            w.push(format!("> **Example:** {value}"));
        } else {
            w.push(format!("- **{label}:** {value}"));
        }
        w.advance();
        true
    }

    // Rule 10: everything else is a cleaned paragraph line.
    fn rule_paragraph(&self, w: &mut Walker) -> bool {
        let cleaned = self.inline.clean(w.current());
        if !cleaned.is_empty() {
            w.push_paragraph(cleaned);
        }
        w.advance();
        true
    }
}

impl Default for SmartMarkdownRewriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite smart-summary text with a default rewriter.
pub fn rewrite_smart(raw: &str) -> String {
    SmartMarkdownRewriter::new().rewrite(raw)
}

/// Line-index walker with lookahead over the source, accumulating
/// output lines.
struct Walker<'a> {
    lines: Vec<&'a str>,
    idx: usize,
    out: Vec<String>,
    section: Option<String>,
}

impl<'a> Walker<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            idx: 0,
            out: Vec::new(),
            section: None,
        }
    }

    fn done(&self) -> bool {
        self.idx >= self.lines.len()
    }

    fn current(&self) -> &'a str {
        self.lines[self.idx]
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.idx + 1).copied()
    }

    fn advance(&mut self) {
        self.idx += 1;
    }

    fn set_section(&mut self, title: &str) {
        self.section = Some(title.trim().trim_end_matches(':').to_lowercase());
    }

    fn push(&mut self, line: String) {
        self.out.push(line);
    }

    fn last_line(&self) -> Option<&str> {
        self.out.last().map(String::as_str)
    }

    fn ensure_blank(&mut self) {
        if self.last_line().is_some_and(|l| !l.is_empty()) {
            self.out.push(String::new());
        }
    }

    fn push_heading(&mut self, text: &str) {
        self.ensure_blank();
        self.out.push(format!("## {text}"));
        self.out.push(String::new());
    }

    fn push_pipe_row(&mut self, row: &str) {
        if self.last_line().is_some_and(|l| !l.is_empty() && !l.starts_with('|')) {
            self.out.push(String::new());
        }
        self.out.push(row.to_string());
    }

    fn push_table(&mut self, table: &TableBlock) {
        self.ensure_blank();
        for line in table.to_gfm().lines() {
            self.out.push(line.to_string());
        }
        self.out.push(String::new());
    }

    fn push_paragraph(&mut self, text: String) {
        // A paragraph directly after a list item, pipe row, or quote
        // would lazily continue that block.
        if self
            .last_line()
            .is_some_and(|l| l.starts_with("- ") || l.starts_with("  - ") || l.starts_with('|') || l.starts_with('>'))
        {
            self.out.push(String::new());
        }
        self.out.push(text);
    }

    fn finish(self) -> String {
        let joined = self.out.join("\n");
        joined.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapper_title_dropped() {
        let md = rewrite_smart("Smart Summary: The Brain\nThe brain is an organ.");
        assert_eq!(md, "The brain is an organ.");
    }

    #[test]
    fn test_numbered_heading() {
        let md = rewrite_smart("1. Overview\nThe brain controls everything.");
        assert_eq!(md, "## Overview\n\nThe brain controls everything.");
    }

    #[test]
    fn test_known_title_heading() {
        let md = rewrite_smart("Key Insights and Core Concepts:\n- Neurons fire.");
        assert_eq!(md, "## Key Insights and Core Concepts\n\n- Neurons fire.");
    }

    #[test]
    fn test_generic_heading_guess() {
        let md = rewrite_smart("Key Historical Events\nThe first EEG was recorded in 1924.");
        assert!(md.starts_with("## Key Historical Events"));
    }

    #[test]
    fn test_generic_heading_rejects_key_value_shape() {
        let md = rewrite_smart("Definition: a short one");
        assert!(!md.contains("##"));
        assert_eq!(md, "Definition: a short one");
    }

    #[test]
    fn test_facts_section_forces_bullets() {
        let md = rewrite_smart(
            "Additional Interesting Facts\nThe brain weighs 1.4kg.\nIt uses 20% of body energy.",
        );
        assert_eq!(
            md,
            "## Additional Interesting Facts\n\n- The brain weighs 1.4kg.\n- It uses 20% of body energy."
        );
    }

    #[test]
    fn test_table_inference_multi_space() {
        let md = rewrite_smart("Part  Function\nCerebrum  Thinking\nCerebellum  Balance");
        assert_eq!(
            md,
            "| Part | Function |\n| --- | --- |\n| Cerebrum | Thinking |\n| Cerebellum | Balance |"
        );
    }

    #[test]
    fn test_table_inference_stops_at_blank() {
        let md = rewrite_smart("Part  Function\nCerebrum  Thinking\n\nProse resumes here.");
        assert!(md.contains("| Cerebrum | Thinking |"));
        assert!(md.contains("Prose resumes here."));
        assert!(!md.contains("| Prose"));
    }

    #[test]
    fn test_key_value_badge_label_stays_paragraph() {
        let md = rewrite_smart("Key Concept: Boss of Your Body");
        assert_eq!(md, "Key Concept: Boss of Your Body");
    }

    #[test]
    fn test_key_value_example_becomes_quote() {
        let md = rewrite_smart("Example: riding a bike uses the cerebellum");
        assert_eq!(md, "> **Example:** riding a bike uses the cerebellum");
    }

    #[test]
    fn test_key_value_other_label_becomes_bold_bullet() {
        let md = rewrite_smart("Size: about 1.4 kilograms");
        assert_eq!(md, "- **Size:** about 1.4 kilograms");
    }

    #[test]
    fn test_bullets_normalized() {
        let md = rewrite_smart("* First\n• Second\n  - Child item");
        assert_eq!(md, "- First\n- Second\n  - Child item");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Smart Summary\n1. Overview\nText here.\nPart  Function\nCerebrum  Thinking\n\nAdditional Interesting Facts\nFact one here.\nExample: a worked example",
            "Key Concept: Boss of Your Body\nSize: big",
            "- a\n  - b\nplain",
        ];
        for raw in samples {
            let once = rewrite_smart(raw);
            let twice = rewrite_smart(&once);
            assert_eq!(twice, once, "raw: {raw:?}");
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(rewrite_smart(""), "");
        assert_eq!(rewrite_smart("  \n \n"), "");
    }
}
