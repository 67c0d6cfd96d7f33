//! Inline markdown noise removal.

use regex::Regex;

/// Strips inline markdown markers and collapses whitespace in a
/// single line. Block-level structure (list markers, headings) is the
/// job of the other passes; this one only touches what sits inside a
/// line.
pub struct InlineCleaner {
    br_tag: Regex,
    bold: Regex,
    underscore_bold: Regex,
    emphasis: Regex,
    code: Regex,
    whitespace: Regex,
}

impl InlineCleaner {
    /// Create a new cleaner with its patterns compiled.
    pub fn new() -> Self {
        Self {
            br_tag: Regex::new(r"(?i)<br\s*/?>").unwrap(),
            bold: Regex::new(r"\*\*([^*]+)\*\*").unwrap(),
            underscore_bold: Regex::new(r"__([^_]+)__").unwrap(),
            emphasis: Regex::new(r"\*([^*\s][^*]*)\*").unwrap(),
            code: Regex::new(r"`([^`]+)`").unwrap(),
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Replace `<br>`-like tags with newlines.
    ///
    /// Runs before line splitting so that multi-line "cells" embedded
    /// in a single source line become real lines first.
    pub fn split_br(&self, text: &str) -> String {
        self.br_tag.replace_all(text, "\n").to_string()
    }

    /// Strip bold/italic/code wrappers (keeping the inner text),
    /// collapse whitespace runs to one space, and trim.
    pub fn clean(&self, line: &str) -> String {
        let line = self.bold.replace_all(line, "$1");
        let line = self.underscore_bold.replace_all(&line, "$1");
        let line = self.emphasis.replace_all(&line, "$1");
        let line = self.code.replace_all(&line, "$1");
        let line = self.whitespace.replace_all(&line, " ");
        line.trim().to_string()
    }
}

impl Default for InlineCleaner {
    fn default() -> Self {
        Self::new()
    }
}
