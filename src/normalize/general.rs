//! Whole-document text normalization.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::{InlineCleaner, ListMarkerNormalizer, CANONICAL_BULLET};

/// Options for the general normalization pass.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Normalize Unicode to NFC form before anything else
    pub normalize_unicode: bool,

    /// Bullet character emitted for every list marker
    pub bullet: char,

    /// Strip leading markdown heading markers (#..######)
    pub strip_heading_markers: bool,

    /// Strip leading blockquote markers (>)
    pub strip_blockquote_markers: bool,

    /// Keep a two-space child indent for lines indented 2+ spaces in
    /// the source (the bullet hierarchy and Cornell continuations
    /// depend on it)
    pub preserve_child_indent: bool,

    /// Maximum consecutive blank lines in the output
    pub max_blank_lines: u8,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            bullet: CANONICAL_BULLET,
            strip_heading_markers: true,
            strip_blockquote_markers: true,
            preserve_child_indent: true,
            max_blank_lines: 2,
        }
    }
}

/// Whole-document normalizer composing the inline cleaner and the
/// list marker pass.
///
/// Guarantees: idempotent (`normalize(normalize(x)) == normalize(x)`),
/// never fails, empty input yields an empty string. Output carries the
/// `NormalizedText` invariants: no heading markers, one bullet
/// convention, bounded blank runs, no stray line-edge whitespace
/// beyond the quantized child indent.
pub struct TextNormalizer {
    options: NormalizeOptions,
    inline: InlineCleaner,
    lists: ListMarkerNormalizer,
    heading_marker: Regex,
    blockquote_marker: Regex,
    indent: Regex,
}

impl TextNormalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            inline: InlineCleaner::new(),
            lists: ListMarkerNormalizer::new(),
            heading_marker: Regex::new(r"^\s*#{1,6}\s+").unwrap(),
            blockquote_marker: Regex::new(r"^\s*(?:>\s*)+").unwrap(),
            indent: Regex::new(r"^[ \t]*").unwrap(),
        }
    }

    /// The options this normalizer was built with.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize a whole document.
    pub fn normalize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let text = if self.options.normalize_unicode {
            text.nfc().collect::<String>()
        } else {
            text.to_string()
        };

        // Embedded <br> "cells" become real lines before line work.
        let text = self.inline.split_br(&text);

        let lines: Vec<String> = text.lines().map(|line| self.normalize_line(line)).collect();
        self.collapse_blank_runs(&lines)
    }

    fn normalize_line(&self, line: &str) -> String {
        if line.trim().is_empty() {
            return String::new();
        }

        // List markers first: the marker defines the line's shape and
        // its indent level.
        if let Some((indent, rest)) = self.lists.split_marker(line) {
            let prefix = if self.options.preserve_child_indent && indent >= 2 {
                "  "
            } else {
                ""
            };
            let cleaned = self.inline.clean(rest);
            if cleaned.is_empty() {
                return String::new();
            }
            return format!("{}{} {}", prefix, self.options.bullet, cleaned);
        }

        let mut rest = line;
        if self.options.strip_heading_markers {
            if let Some(m) = self.heading_marker.find(rest) {
                rest = &rest[m.end()..];
            }
        }
        if self.options.strip_blockquote_markers {
            if let Some(m) = self.blockquote_marker.find(rest) {
                rest = &rest[m.end()..];
            }
        }

        let indent_width = self.indent.find(line).map_or(0, |m| m.as_str().len());
        let cleaned = self.inline.clean(rest);
        if self.options.preserve_child_indent && indent_width >= 2 && !cleaned.is_empty() {
            return format!("  {}", cleaned);
        }
        cleaned
    }

    fn collapse_blank_runs(&self, lines: &[String]) -> String {
        let max = self.options.max_blank_lines as usize;
        let mut out: Vec<&str> = Vec::with_capacity(lines.len());
        let mut blanks = 0usize;
        for line in lines {
            if line.is_empty() {
                blanks += 1;
                if blanks <= max {
                    out.push("");
                }
            } else {
                blanks = 0;
                out.push(line);
            }
        }
        // Drop leading/trailing blank lines entirely.
        let start = out.iter().position(|l| !l.is_empty()).unwrap_or(0);
        let end = out.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);
        out[start..end].join("\n")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

/// Normalize a document with default options.
pub fn normalize(text: &str) -> String {
    TextNormalizer::default().normalize(text)
}
