//! Section lookup store

use std::sync::atomic::{AtomicI64, Ordering};

use cms_core::traits::Id;
use parking_lot::RwLock;

use crate::section::Section;

/// Lookup interface for the section hierarchy.
///
/// Returning `None` from `root` is a valid state (an empty hierarchy), not
/// an infrastructure failure; attachment validation turns it into a
/// field error on the record being saved.
pub trait SectionStore: Send + Sync {
    /// The distinguished root of the hierarchy, if one exists
    fn root(&self) -> Option<Section>;

    /// Find a section by ID
    fn find(&self, id: Id) -> Option<Section>;
}

/// In-memory section store for tests and wiring
pub struct MemorySectionStore {
    sections: RwLock<Vec<Section>>,
    next_id: AtomicI64,
}

impl Default for MemorySectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySectionStore {
    pub fn new() -> Self {
        Self {
            sections: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Add a section, assigning its ID
    pub fn add(&self, mut section: Section) -> Section {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        section.id = Some(id);

        let mut sections = self.sections.write();
        sections.push(section.clone());

        section
    }
}

impl SectionStore for MemorySectionStore {
    fn root(&self) -> Option<Section> {
        let sections = self.sections.read();
        sections.iter().find(|s| s.is_root()).cloned()
    }

    fn find(&self, id: Id) -> Option<Section> {
        let sections = self.sections.read();
        sections.iter().find(|s| s.id == Some(id)).cloned()
    }
}
