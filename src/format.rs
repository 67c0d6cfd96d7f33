//! Summary format tags.
//!
//! Upstream content arrives as an opaque string plus a declared format
//! tag. The tag selects which normalization front-end runs; it never
//! changes the PDF or sectioning back-ends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The four content formats produced by the upstream generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    /// Free-form text rewritten into canonical markdown with inferred
    /// headings and tables.
    Smart,
    /// Cornell note layout, sometimes delivered as a pipe pseudo-table.
    Cornell,
    /// Flat or two-level bulleted notes.
    Bullets,
    /// Prose paragraphs.
    #[default]
    Paragraph,
}

impl SummaryFormat {
    /// All recognized formats.
    pub const ALL: [SummaryFormat; 4] = [
        SummaryFormat::Smart,
        SummaryFormat::Cornell,
        SummaryFormat::Bullets,
        SummaryFormat::Paragraph,
    ];

    /// The canonical tag string for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryFormat::Smart => "smart",
            SummaryFormat::Cornell => "cornell",
            SummaryFormat::Bullets => "bullets",
            SummaryFormat::Paragraph => "paragraph",
        }
    }

    /// Lenient tag parsing: unknown or empty tags fall back to
    /// [`SummaryFormat::Paragraph`] rather than failing, so a stale or
    /// misspelled tag from the content API still renders something.
    pub fn detect(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }
}

impl FromStr for SummaryFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smart" => Ok(SummaryFormat::Smart),
            "cornell" => Ok(SummaryFormat::Cornell),
            "bullets" | "bullet" => Ok(SummaryFormat::Bullets),
            "paragraph" | "paragraphs" => Ok(SummaryFormat::Paragraph),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for SummaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        assert_eq!(
            "smart".parse::<SummaryFormat>().unwrap(),
            SummaryFormat::Smart
        );
        assert_eq!(
            "Cornell".parse::<SummaryFormat>().unwrap(),
            SummaryFormat::Cornell
        );
        assert_eq!(
            " bullets ".parse::<SummaryFormat>().unwrap(),
            SummaryFormat::Bullets
        );
    }

    #[test]
    fn test_parse_unknown_tag() {
        let result = "outline".parse::<SummaryFormat>();
        assert!(matches!(result, Err(Error::UnknownFormat(_))));
    }

    #[test]
    fn test_detect_falls_back_to_paragraph() {
        assert_eq!(SummaryFormat::detect("outline"), SummaryFormat::Paragraph);
        assert_eq!(SummaryFormat::detect(""), SummaryFormat::Paragraph);
        assert_eq!(SummaryFormat::detect("SMART"), SummaryFormat::Smart);
    }

    #[test]
    fn test_display_round_trip() {
        for format in SummaryFormat::ALL {
            assert_eq!(SummaryFormat::detect(format.as_str()), format);
        }
    }
}
