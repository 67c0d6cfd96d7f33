//! Error types for the unsummary library.

use thiserror::Error;

/// Result type alias for unsummary operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering summary content.
///
/// The recovery pipeline itself never fails on malformed text (it
/// degrades to pass-through); these variants cover the injected
/// primitives and strict-mode API misuse.
#[derive(Error, Debug)]
pub enum Error {
    /// The format tag is not one of the recognized summary formats.
    #[error("Unknown summary format: {0}")]
    UnknownFormat(String),

    /// The injected markdown engine failed to render.
    #[error("Markdown rendering error: {0}")]
    Render(String),

    /// The injected HTML sanitizer rejected the document.
    #[error("Sanitization error: {0}")]
    Sanitize(String),

    /// The PDF canvas reported a drawing failure.
    #[error("PDF layout error: {0}")]
    PdfLayout(String),

    /// Error serializing structured output.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}
