//! Cornell-format normalization.
//!
//! Cornell summaries sometimes arrive as a cue/notes pseudo-table
//! built from pipe rows. The table shape carries no information the
//! bullet convention cannot — each row is a cue plus its notes — so
//! the rows are flattened into bullets with indented continuations
//! instead of being rendered as a grid.

use regex::Regex;

use super::{InlineCleaner, NormalizeOptions, TextNormalizer};

/// Flattens pipe-delimited pseudo-tables into the bullet convention,
/// delegating entirely to the general normalizer when no pipe rows
/// are present.
pub struct CornellNormalizer {
    normalizer: TextNormalizer,
    inline: InlineCleaner,
    separator_row: Regex,
}

impl CornellNormalizer {
    /// Create a normalizer with default options.
    pub fn new() -> Self {
        Self::with_options(NormalizeOptions::default())
    }

    /// Create a normalizer with explicit options.
    pub fn with_options(options: NormalizeOptions) -> Self {
        Self {
            normalizer: TextNormalizer::new(options),
            inline: InlineCleaner::new(),
            separator_row: Regex::new(r"^\|[\s:|\-]+\|$").unwrap(),
        }
    }

    /// Normalize Cornell-format text.
    pub fn normalize(&self, text: &str) -> String {
        let has_pipe_rows = text.lines().any(|line| is_pipe_row(line));
        if !has_pipe_rows {
            return self.normalizer.normalize(text);
        }

        let bullet = self.normalizer.options().bullet;
        let mut out: Vec<String> = Vec::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if !is_pipe_row(trimmed) {
                out.push(self.inline.clean(trimmed));
                continue;
            }
            if self.separator_row.is_match(trimmed) && trimmed.contains('-') {
                continue;
            }

            let cells: Vec<String> = split_pipe_cells(trimmed)
                .into_iter()
                .map(|cell| self.inline.clean(&cell))
                .filter(|cell| !cell.is_empty())
                .collect();

            match cells.len() {
                0 => {}
                1 => out.push(format!("{} {}", bullet, cells[0])),
                _ => {
                    out.push(format!("{} {}", bullet, cells[0]));
                    out.push(format!("  {}", cells[1..].join(" — ")));
                }
            }
        }

        // Final pass collapses blank runs and catches any non-pipe
        // lines that still carried markers.
        self.normalizer.normalize(&out.join("\n"))
    }
}

impl Default for CornellNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize Cornell-format text with default options.
pub fn normalize_cornell(text: &str) -> String {
    CornellNormalizer::new().normalize(text)
}

fn is_pipe_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() > 1 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

fn split_pipe_cells(line: &str) -> Vec<String> {
    let mut s = line.trim();
    s = s.strip_prefix('|').unwrap_or(s);
    s = s.strip_suffix('|').unwrap_or(s);
    s.split('|').map(|cell| cell.trim().to_string()).collect()
}
