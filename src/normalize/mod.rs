//! Text canonicalization passes.
//!
//! The upstream generator emits loosely-structured text: markdown
//! fragments, decimal outlines, pseudo-tables, inline bold/italic
//! noise. These passes reduce it to one canonical plain-text shape —
//! a single bullet convention, no heading markers, bounded blank runs —
//! that the structure-recovery stages can rely on. Every pass is
//! idempotent and total: malformed input degrades to pass-through,
//! never an error.

mod cornell;
mod general;
mod inline;
mod list;

pub use cornell::{normalize_cornell, CornellNormalizer};
pub use general::{normalize, NormalizeOptions, TextNormalizer};
pub use inline::InlineCleaner;
pub use list::{ListMarkerNormalizer, CANONICAL_BULLET};
