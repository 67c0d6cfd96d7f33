//! Section splitting by heading heuristics.

use regex::Regex;

use crate::model::Section;
use crate::normalize::ListMarkerNormalizer;

/// Headings the upstream generator emits verbatim. Matched
/// case-insensitively, trailing colon optional.
const KNOWN_HEADINGS: &[&str] = &[
    "overview",
    "summary",
    "key insights",
    "core structures",
    "interesting facts",
    "brain structure and functions",
    "key insights and core concepts",
];

/// Default title used before the first heading is seen.
const DEFAULT_TITLE: &str = "Overview";

/// Title of the synthetic fallback section.
const FALLBACK_TITLE: &str = "Summary";

/// Partitions normalized text into ordered `{title, body}` sections.
///
/// Heading candidates are checked in fixed priority order: the known
/// heading vocabulary first, then the explicit trailing-colon shape,
/// then the generic heading-shape guess. Empty-bodied sections are
/// dropped, and at least one section is always returned.
pub struct SectionSplitter {
    lists: ListMarkerNormalizer,
    colon_heading: Regex,
    has_letter: Regex,
}

impl SectionSplitter {
    /// Create a splitter with its patterns compiled.
    pub fn new() -> Self {
        Self {
            lists: ListMarkerNormalizer::new(),
            colon_heading: Regex::new(r"^(.{1,80}):$").unwrap(),
            has_letter: Regex::new(r"[A-Za-z]").unwrap(),
        }
    }

    /// Split normalized text into sections.
    pub fn split(&self, text: &str) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();
        let mut title = DEFAULT_TITLE.to_string();
        let mut body: Vec<&str> = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                // Blank lines never start a heading; keep them so the
                // body retains its paragraph breaks.
                body.push("");
                continue;
            }

            if let Some(heading) = self.match_known_heading(trimmed) {
                flush(&mut sections, &mut title, &mut body, heading);
                continue;
            }

            if !self.lists.is_list_line(trimmed) {
                if let Some(caps) = self.colon_heading.captures(trimmed) {
                    let heading = caps[1].trim().to_string();
                    flush(&mut sections, &mut title, &mut body, heading);
                    continue;
                }

                if self.looks_like_heading(trimmed) {
                    // Only flush accumulated content; two consecutive
                    // heading-like lines must not emit an empty section.
                    flush(&mut sections, &mut title, &mut body, trimmed.to_string());
                    continue;
                }
            }

            body.push(line);
        }

        flush_body(&mut sections, &title, &mut body);

        if sections.is_empty() {
            return vec![Section::new(FALLBACK_TITLE, text.trim())];
        }
        sections
    }

    fn match_known_heading(&self, line: &str) -> Option<String> {
        let stripped = line.strip_suffix(':').unwrap_or(line).trim();
        let lowered = stripped.to_lowercase();
        KNOWN_HEADINGS
            .iter()
            .any(|known| *known == lowered)
            .then(|| stripped.to_string())
    }

    fn looks_like_heading(&self, line: &str) -> bool {
        line.chars().count() <= 80
            && !line.ends_with(['.', '!', '?'])
            && self.has_letter.is_match(line)
    }
}

impl Default for SectionSplitter {
    fn default() -> Self {
        Self::new()
    }
}

fn flush(sections: &mut Vec<Section>, title: &mut String, body: &mut Vec<&str>, next: String) {
    flush_body(sections, title, body);
    *title = next;
}

fn flush_body(sections: &mut Vec<Section>, title: &str, body: &mut Vec<&str>) {
    let text = body.join("\n").trim().to_string();
    body.clear();
    if !text.is_empty() {
        sections.push(Section::new(title, text));
    }
}

/// Split normalized text into sections with a default splitter.
pub fn split_sections(text: &str) -> Vec<Section> {
    SectionSplitter::new().split(text)
}
