//! HTML rendering path: injected primitives and the post-render
//! enhancer.

mod engine;
mod enhance;
mod tree;

pub use engine::{BasicSanitizer, HtmlSanitizer, MarkdownEngine, PulldownEngine};
pub use enhance::{enhance_html, HtmlEnhancer};
