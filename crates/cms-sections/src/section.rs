//! Section model

use cms_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

/// A node in the section hierarchy.
///
/// Every site has a distinguished root section (no parent); attachments
/// that are not filed anywhere explicitly end up under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section ID
    pub id: Option<Id>,
    /// Display name
    pub name: String,
    /// Path of this section within the hierarchy (e.g. "/", "/about")
    pub path: String,
    /// Parent section, `None` for the root
    pub parent_id: Option<Id>,
}

impl Section {
    /// Create a new section
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            path: path.into(),
            parent_id: None,
        }
    }

    /// Set the parent section
    pub fn with_parent(mut self, parent_id: Id) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Check if this is the hierarchy root
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl Identifiable for Section {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_no_parent() {
        let root = Section::new("My Site", "/");
        assert!(root.is_root());
        assert!(root.is_new_record());
    }

    #[test]
    fn test_child_section() {
        let child = Section::new("About Us", "/about").with_parent(1);
        assert!(!child.is_root());
        assert_eq!(child.parent_id, Some(1));
    }
}
