//! Two-level bullet hierarchy items.

use serde::{Deserialize, Serialize};

/// A top-level bullet with its grouped child lines.
///
/// Children are attached only to the most recently created parent; an
/// item with no qualifying children has an empty `children` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletItem {
    /// De-bulleted, cleaned text of the top-level line.
    pub text: String,

    /// De-bulleted child lines, in source order.
    pub children: Vec<String>,
}

impl BulletItem {
    /// Create a new item with no children.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Attach a child line.
    pub fn add_child(&mut self, child: impl Into<String>) {
        self.children.push(child.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_item() {
        let mut item = BulletItem::new("Mitochondria");
        assert!(item.children.is_empty());

        item.add_child("Function: produces ATP");
        assert_eq!(item.children, vec!["Function: produces ATP"]);
    }
}
