//! Ordered block extraction for PDF drawing.

use regex::Regex;

use crate::model::ContentBlock;
use crate::normalize::{InlineCleaner, ListMarkerNormalizer, CANONICAL_BULLET};

/// Text block substituted when a document yields no blocks at all.
pub const EMPTY_PLACEHOLDER: &str = "No content available.";

/// Extracts an ordered `{text}`/`{table}` block sequence from
/// normalized or canonical-markdown text, for direct low-level PDF
/// drawing.
pub struct PdfBlockExtractor {
    separator_row: Regex,
    heading_marker: Regex,
    blockquote_marker: Regex,
    inline: InlineCleaner,
    lists: ListMarkerNormalizer,
}

impl PdfBlockExtractor {
    /// Create an extractor with its patterns compiled.
    pub fn new() -> Self {
        Self {
            separator_row: Regex::new(r"^\|\s*:?-{3,}.*\|$").unwrap(),
            heading_marker: Regex::new(r"^#{1,6}\s+").unwrap(),
            blockquote_marker: Regex::new(r"^(?:>\s*)+").unwrap(),
            inline: InlineCleaner::new(),
            lists: ListMarkerNormalizer::new(),
        }
    }

    /// Extract blocks in source order. An all-empty input yields an
    /// empty list; see [`blocks_or_placeholder`].
    pub fn extract(&self, text: &str) -> Vec<ContentBlock> {
        let lines: Vec<&str> = text.lines().collect();
        let mut blocks: Vec<ContentBlock> = Vec::new();
        let mut buffer: Vec<String> = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let trimmed = lines[i].trim();

            // A pipe header directly over a separator row opens a table.
            if is_pipe_row(trimmed)
                && lines
                    .get(i + 1)
                    .is_some_and(|next| self.separator_row.is_match(next.trim()))
            {
                flush_text(&mut blocks, &mut buffer);

                let headers = self.parse_cells(trimmed);
                i += 2;
                let mut rows: Vec<Vec<String>> = Vec::new();
                while i < lines.len() && is_pipe_row(lines[i].trim()) {
                    rows.push(self.parse_cells(lines[i].trim()));
                    i += 1;
                }
                log::debug!("pdf table block: {} columns, {} rows", headers.len(), rows.len());
                blocks.push(ContentBlock::table(headers, rows));
                continue;
            }

            if trimmed.is_empty() {
                if !buffer.is_empty() {
                    buffer.push(String::new());
                }
            } else {
                buffer.push(self.normalize_text_line(trimmed));
            }
            i += 1;
        }

        flush_text(&mut blocks, &mut buffer);
        blocks
    }

    fn normalize_text_line(&self, line: &str) -> String {
        if let Some((indent, rest)) = self.lists.split_marker(line) {
            let prefix = if indent >= 2 { "  " } else { "" };
            return format!("{}{} {}", prefix, CANONICAL_BULLET, self.inline.clean(rest));
        }
        let mut rest = line;
        if let Some(m) = self.heading_marker.find(rest) {
            rest = &rest[m.end()..];
        }
        if let Some(m) = self.blockquote_marker.find(rest) {
            rest = &rest[m.end()..];
        }
        self.inline.clean(rest)
    }

    fn parse_cells(&self, row: &str) -> Vec<String> {
        let mut s = row;
        s = s.strip_prefix('|').unwrap_or(s);
        s = s.strip_suffix('|').unwrap_or(s);
        s.split('|').map(|cell| self.inline.clean(cell)).collect()
    }
}

impl Default for PdfBlockExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn is_pipe_row(line: &str) -> bool {
    line.len() > 1 && line.starts_with('|') && line.ends_with('|')
}

fn flush_text(blocks: &mut Vec<ContentBlock>, buffer: &mut Vec<String>) {
    let text = buffer.join("\n").trim().to_string();
    buffer.clear();
    if !text.is_empty() {
        blocks.push(ContentBlock::text(text));
    }
}

/// Extract blocks with a default extractor.
pub fn extract_blocks(text: &str) -> Vec<ContentBlock> {
    PdfBlockExtractor::new().extract(text)
}

/// Extract blocks, substituting a single placeholder text block for an
/// empty document so callers never render nothing.
pub fn blocks_or_placeholder(text: &str) -> Vec<ContentBlock> {
    let blocks = extract_blocks(text);
    if blocks.is_empty() {
        vec![ContentBlock::text(EMPTY_PLACEHOLDER)]
    } else {
        blocks
    }
}
