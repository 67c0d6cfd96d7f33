//! Ordered PDF content blocks.

use serde::{Deserialize, Serialize};

/// One unit of PDF content, in original document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A run of wrapped prose (may contain heading-shaped lines).
    Text {
        /// Accumulated text, bullet markers already canonicalized.
        text: String,
    },
    /// A bordered table.
    Table {
        /// Header cells.
        headers: Vec<String>,
        /// Body rows.
        rows: Vec<Vec<String>>,
    },
}

impl ContentBlock {
    /// Create a text block.
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    /// Create a table block.
    pub fn table(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        ContentBlock::Table { headers, rows }
    }

    /// Check whether this is a table block.
    pub fn is_table(&self) -> bool {
        matches!(self, ContentBlock::Table { .. })
    }
}
