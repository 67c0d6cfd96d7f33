//! Column inference for pseudo-tables.
//!
//! The generator aligns table cells with runs of spaces, and upstream
//! extraction sometimes drops those runs entirely, joining the last
//! word of one cell onto the first word of the next
//! ("CerebrumLargest part"). Columns are recovered two ways: by
//! re-inserting a column gap at lower→upper and digit→upper letter
//! boundaries and splitting on multi-space runs, or by matching the
//! header against the generator's fixed heading vocabulary.

use regex::Regex;

/// Header words the generator uses for the label column.
const LABEL_KEYWORDS: &[&str] = &["Part", "Component", "Topic", "Section"];

/// Header words the generator uses for the value columns.
const VALUE_KEYWORDS: &[&str] = &[
    "Function",
    "Description",
    "Role",
    "Detail",
    "Size",
    "Location",
    "Figure",
];

/// Whitespace/keyword-based table column inference.
pub struct ColumnInference {
    multi_space: Regex,
    word_join: Regex,
    lead_word: Regex,
    sentence_end: Regex,
}

impl ColumnInference {
    /// Create an inference helper with its patterns compiled.
    pub fn new() -> Self {
        Self {
            multi_space: Regex::new(r" {2,}").unwrap(),
            // Column gaps lost to word-joining: re-open them wide
            // enough for the multi-space split to see.
            word_join: Regex::new(r"([a-z0-9])([A-Z])").unwrap(),
            lead_word: Regex::new(r"^([A-Z][A-Za-z'/()-]*)\s+(.+)$").unwrap(),
            sentence_end: Regex::new(r"[.!?]$").unwrap(),
        }
    }

    /// Try to read `line` as a table header row.
    ///
    /// Returns the header cells when either the whitespace split or
    /// the keyword vocabulary yields two or more columns.
    pub fn parse_header(&self, line: &str) -> Option<Vec<String>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Some(cells) = self.split_columns(line) {
            return Some(cells);
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() >= 2
            && LABEL_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(tokens[0]))
            && tokens[1..]
                .iter()
                .all(|t| VALUE_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(t)))
        {
            log::debug!("table header matched keyword vocabulary: {line:?}");
            return Some(tokens.into_iter().map(String::from).collect());
        }

        None
    }

    /// Try to read `line` as a body row of a table with `expected`
    /// columns. Overflow cells are folded into the last column.
    pub fn parse_row(&self, line: &str, expected: usize) -> Option<Vec<String>> {
        let line = line.trim();
        if line.is_empty() || expected < 2 {
            return None;
        }

        if let Some(mut cells) = self.split_columns(line) {
            if cells.len() > expected {
                let overflow = cells.split_off(expected);
                if let Some(last) = cells.last_mut() {
                    for cell in overflow {
                        last.push(' ');
                        last.push_str(&cell);
                    }
                }
            }
            return Some(cells);
        }

        self.split_single_column(line, expected)
    }

    /// Check whether `line` plus the lookahead `next` open a table: a
    /// parseable header followed by a row that parses to two or more
    /// columns by the same method.
    pub fn looks_like_table_start(&self, line: &str, next: Option<&str>) -> bool {
        let Some(headers) = self.parse_header(line) else {
            return false;
        };
        if headers.len() < 2 {
            return false;
        }
        match next {
            Some(next) => self.parse_row(next, headers.len()).is_some(),
            None => false,
        }
    }

    /// Split on multi-space runs after re-opening joined word
    /// boundaries. `None` unless at least two columns appear.
    fn split_columns(&self, line: &str) -> Option<Vec<String>> {
        let widened = self.word_join.replace_all(line, "$1  $2");
        let cells: Vec<String> = self
            .multi_space
            .split(&widened)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        (cells.len() >= 2).then_some(cells)
    }

    /// Single-column fallback: split a leading capitalized phrase from
    /// the remainder, and split the remainder into a middle/tail pair
    /// when three or more columns are expected.
    fn split_single_column(&self, line: &str, expected: usize) -> Option<Vec<String>> {
        // Prose guard: rows are short label-ish lines, not sentences.
        if self.sentence_end.is_match(line) || line.chars().count() > 100 {
            return None;
        }
        let caps = self.lead_word.captures(line)?;
        let lead = caps[1].to_string();
        let rest = caps[2].trim().to_string();

        if expected < 3 {
            return Some(vec![lead, rest]);
        }

        // Middle/tail: the tail starts at the last capitalized word,
        // which in this layout is the first word of the final cell.
        let words: Vec<&str> = rest.split_whitespace().collect();
        let tail_at = words
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .find(|(_, w)| w.starts_with(|c: char| c.is_ascii_uppercase()))
            .map(|(i, _)| i);
        match tail_at {
            Some(i) => Some(vec![lead, words[..i].join(" "), words[i..].join(" ")]),
            None => Some(vec![lead, rest]),
        }
    }
}

impl Default for ColumnInference {
    fn default() -> Self {
        Self::new()
    }
}
