//! List marker canonicalization.

use regex::Regex;

/// The single bullet character used after normalization, replacing
/// all source-specific list markers.
pub const CANONICAL_BULLET: char = '•';

/// Rewrites heterogeneous list prefixes — numbered `1.`, decimal
/// outlines `1.1.`, markdown `-`/`*`/`+`, assorted bullet glyphs —
/// into one canonical bullet.
pub struct ListMarkerNormalizer {
    marker: Regex,
    glyph: Regex,
}

impl ListMarkerNormalizer {
    /// Create a new normalizer with its patterns compiled.
    pub fn new() -> Self {
        Self {
            // Decimal outline first so "1.1. Foo" is not read as "1." + "1. Foo".
            marker: Regex::new(r"^(\s*)(?:\d+(?:\.\d+)+\.|\d+\.|[-*+])\s+(.+)$").unwrap(),
            glyph: Regex::new(r"^(\s*)[•●○■□◆◇▪▫►▻]\s*(.*)$").unwrap(),
        }
    }

    /// Split a list line into (indent width, text after the marker).
    ///
    /// Returns `None` for lines that carry no recognized marker.
    pub fn split_marker<'a>(&self, line: &'a str) -> Option<(usize, &'a str)> {
        if let Some(caps) = self.glyph.captures(line) {
            let indent = caps.get(1).map_or(0, |m| m.as_str().len());
            return Some((indent, caps.get(2).map_or("", |m| m.as_str())));
        }
        if let Some(caps) = self.marker.captures(line) {
            let indent = caps.get(1).map_or(0, |m| m.as_str().len());
            return Some((indent, caps.get(2).map_or("", |m| m.as_str())));
        }
        None
    }

    /// Check whether a line starts with any recognized list marker.
    pub fn is_list_line(&self, line: &str) -> bool {
        self.split_marker(line).is_some()
    }

    /// Rewrite the line's marker to `bullet`, or return `None` when
    /// the line is not a list line. Indentation of two or more spaces
    /// is quantized to a single two-space child level when
    /// `preserve_indent` is set, otherwise dropped.
    pub fn rewrite(&self, line: &str, bullet: char, preserve_indent: bool) -> Option<String> {
        let (indent, rest) = self.split_marker(line)?;
        let prefix = if preserve_indent && indent >= 2 { "  " } else { "" };
        Some(format!("{}{} {}", prefix, bullet, rest.trim()))
    }
}

impl Default for ListMarkerNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_variants() {
        let lists = ListMarkerNormalizer::new();
        for line in ["1. Foo", "12. Foo", "1.1. Foo", "2.3.1. Foo", "- Foo", "* Foo", "+ Foo", "• Foo", "● Foo"] {
            assert_eq!(
                lists.rewrite(line, CANONICAL_BULLET, true).as_deref(),
                Some("• Foo"),
                "line: {line:?}"
            );
        }
    }

    #[test]
    fn test_indented_child_quantized() {
        let lists = ListMarkerNormalizer::new();
        assert_eq!(
            lists.rewrite("    - Function: produces ATP", CANONICAL_BULLET, true),
            Some("  • Function: produces ATP".to_string())
        );
        assert_eq!(
            lists.rewrite("    - Function: produces ATP", CANONICAL_BULLET, false),
            Some("• Function: produces ATP".to_string())
        );
    }

    #[test]
    fn test_non_list_lines_untouched() {
        let lists = ListMarkerNormalizer::new();
        assert!(lists.split_marker("The brain weighs 1.4kg.").is_none());
        assert!(lists.split_marker("3.14 is pi").is_none());
        assert!(lists.split_marker("").is_none());
    }

    #[test]
    fn test_split_marker_indent() {
        let lists = ListMarkerNormalizer::new();
        assert_eq!(lists.split_marker("  - child"), Some((2, "child")));
        assert_eq!(lists.split_marker("• top"), Some((0, "top")));
    }
}
