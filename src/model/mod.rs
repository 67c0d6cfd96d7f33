//! Data model for recovered document structure.
//!
//! Everything here is derived and stateless: each value is recomputed
//! from the raw input on every render and never mutated in place.

mod block;
mod bullet;
mod section;
mod table;

pub use block::ContentBlock;
pub use bullet::BulletItem;
pub use section::Section;
pub use table::{TableBlock, CELL_PLACEHOLDER};
