//! Titled sections of normalized text.

use serde::{Deserialize, Serialize};

/// A titled slice of the document, produced by the section splitter.
///
/// Invariant: `body` is non-empty — empty-bodied sections are dropped
/// during splitting, and the splitter always yields at least one
/// section (a synthetic "Summary" wrapping the whole text if nothing
/// else matched).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text, without any trailing colon.
    pub title: String,

    /// Normalized body text under this heading.
    pub body: String,
}

impl Section {
    /// Create a new section.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Check whether the body holds any non-whitespace content.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}
