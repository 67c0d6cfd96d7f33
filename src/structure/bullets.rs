//! Bullet hierarchy grouping.

use regex::Regex;

use crate::model::BulletItem;
use crate::normalize::{InlineCleaner, ListMarkerNormalizer};

/// Groups child lines under the preceding top-level bullet.
///
/// A line is a child of the most recent top-level item if it is
/// indented by two or more spaces before its marker, or if its
/// de-bulleted text starts with one of the label words the generator
/// uses for detail lines ("Definition:", "Example:", ...). Used by the
/// bullets format only.
pub struct BulletHierarchyParser {
    lists: ListMarkerNormalizer,
    inline: InlineCleaner,
    label_prefix: Regex,
}

impl BulletHierarchyParser {
    /// Create a parser with its patterns compiled.
    pub fn new() -> Self {
        Self {
            lists: ListMarkerNormalizer::new(),
            inline: InlineCleaner::new(),
            // Longer alternatives first so "key figure/detail" is not
            // consumed by "key figure", nor "primary function" by
            // "function".
            label_prefix: Regex::new(
                r"(?i)^(definition|primary functions?|function|role|examples?|details?|description|size/location|location|key figure/detail|key figure|figure)\s*:",
            )
            .unwrap(),
        }
    }

    /// Parse a bulleted body into a two-level hierarchy.
    pub fn parse(&self, body: &str) -> Vec<BulletItem> {
        let mut items: Vec<BulletItem> = Vec::new();

        for line in body.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let (indent, text) = match self.lists.split_marker(line) {
                Some((indent, rest)) => (indent, rest),
                None => (leading_spaces(line), line.trim()),
            };
            let text = self.inline.clean(text);
            if text.is_empty() {
                continue;
            }

            let is_child = indent >= 2 || self.label_prefix.is_match(&text);
            match items.last_mut() {
                Some(parent) if is_child => parent.add_child(text),
                // A child-shaped line with no parent opens the list as
                // a top-level item rather than being lost.
                _ => items.push(BulletItem::new(text)),
            }
        }

        items
    }
}

impl Default for BulletHierarchyParser {
    fn default() -> Self {
        Self::new()
    }
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Parse a bulleted body with a default parser.
pub fn parse_hierarchy(body: &str) -> Vec<BulletItem> {
    BulletHierarchyParser::new().parse(body)
}
