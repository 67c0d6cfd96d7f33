//! PDF export path: block extraction and the canvas layout loop.

mod blocks;
mod layout;

pub use blocks::{blocks_or_placeholder, extract_blocks, PdfBlockExtractor, EMPTY_PLACEHOLDER};
pub use layout::{PdfCanvas, PdfLayout, PdfLayoutOptions, PdfTextStyle, RectStyle};
