//! Path and section derivation strategies.
//!
//! Both strategies run while the record is being prepared for a save, after
//! any staged upload has been moved onto the attachment. The attachment is
//! handed over detached from its slot, so an implementation reads staged
//! values through `host.attaching()`, current state through `attachment`,
//! and writes its result onto the attachment.

use std::sync::Arc;

use cms_attachments::{Attachment, DEFAULT_ATTACHMENT_ROOT};
use cms_sections::SectionStore;

use super::host::Attachable;

/// Chooses the storage path for an attachment before it is validated
pub trait PathDeriver<H: Attachable>: Send + Sync {
    fn derive_path(&self, host: &H, attachment: &mut Attachment);
}

/// Chooses the section an attachment is filed under before it is validated
pub trait SectionDeriver<H: Attachable>: Send + Sync {
    fn derive_section(&self, host: &H, attachment: &mut Attachment);
}

/// Default path strategy: whenever an upload is pending, the attachment is
/// filed under a fixed root, named by the lowercased base name of the
/// uploaded file. Without a pending upload the existing path is kept.
#[derive(Debug, Clone)]
pub struct DefaultPathDeriver {
    root: String,
}

impl Default for DefaultPathDeriver {
    fn default() -> Self {
        Self {
            root: DEFAULT_ATTACHMENT_ROOT.to_string(),
        }
    }
}

impl DefaultPathDeriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }
}

impl<H: Attachable> PathDeriver<H> for DefaultPathDeriver {
    fn derive_path(&self, _host: &H, attachment: &mut Attachment) {
        let derived = attachment
            .temp_file()
            .map(|file| format!("{}/{}", self.root, file.base_name().to_lowercase()));
        if let Some(file_path) = derived {
            attachment.set_file_path(file_path);
        }
    }
}

/// Default section strategy: pending uploads are filed under the root of
/// the section hierarchy. Without a pending upload, or with an empty
/// hierarchy, the attachment is left alone and validation reports the
/// missing section.
pub struct DefaultSectionDeriver {
    sections: Arc<dyn SectionStore>,
}

impl DefaultSectionDeriver {
    pub fn new(sections: Arc<dyn SectionStore>) -> Self {
        Self { sections }
    }
}

impl<H: Attachable> SectionDeriver<H> for DefaultSectionDeriver {
    fn derive_section(&self, _host: &H, attachment: &mut Attachment) {
        if !attachment.has_pending_upload() {
            return;
        }
        if let Some(root) = self.sections.root() {
            attachment.set_section(root);
        }
    }
}
