//! Canonical-markdown reconstruction for the smart format.

mod smart;
mod tables;

pub use smart::{rewrite_smart, SmartMarkdownRewriter};
pub use tables::ColumnInference;
