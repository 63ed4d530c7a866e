//! Per-record attachment state: the loaded attachment, its column mirror,
//! and staged edits waiting for the next save

use cms_attachments::{sanitize_file_path, Attachment, AttachmentVersion, UploadedFile};
use cms_core::traits::{Id, Identifiable};
use cms_sections::Section;

/// Edits staged on the host before they are pushed onto the attachment.
///
/// Staged values shadow the attachment's own state for reads until the next
/// save consumes them. `dirty` records whether any staged write actually
/// differed from the value that was visible at the time.
#[derive(Debug, Default)]
struct AttachmentStaging {
    file: Option<UploadedFile>,
    file_name: Option<String>,
    file_path: Option<String>,
    section_id: Option<Id>,
    section: Option<Section>,
    dirty: bool,
}

/// The attachment state a host record carries.
///
/// Holds the attachment itself (when loaded or built), the two columns the
/// host persists (`attachment_id`, `attachment_version`), and the staging
/// area for edits. Reads go through the staging area first and fall back to
/// the attachment, so a host sees its own pending edits immediately.
#[derive(Debug, Default)]
pub struct AttachmentSlot {
    attachment: Option<Attachment>,
    attachment_id: Option<Id>,
    attachment_version: Option<AttachmentVersion>,
    staging: AttachmentStaging,
}

impl AttachmentSlot {
    /// Empty slot for a brand-new record
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot for a record loaded from storage, carrying its persisted
    /// attachment columns
    pub fn for_record(
        attachment_id: Option<Id>,
        attachment_version: Option<AttachmentVersion>,
    ) -> Self {
        Self {
            attachment_id,
            attachment_version,
            ..Self::default()
        }
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn attachment_mut(&mut self) -> Option<&mut Attachment> {
        self.attachment.as_mut()
    }

    /// Install an attachment, keeping the id column in step when the
    /// attachment is persisted
    pub fn set_attachment(&mut self, attachment: Attachment) {
        if let Some(id) = attachment.id() {
            self.attachment_id = Some(id);
        }
        self.attachment = Some(attachment);
    }

    pub(crate) fn take_attachment(&mut self) -> Option<Attachment> {
        self.attachment.take()
    }

    /// The host's persisted attachment id column
    pub fn attachment_id(&self) -> Option<Id> {
        self.attachment_id
    }

    /// The host's persisted attachment version column
    pub fn attachment_version(&self) -> Option<AttachmentVersion> {
        self.attachment_version
    }

    pub fn set_attachment_version(&mut self, version: AttachmentVersion) {
        self.attachment_version = Some(version);
    }

    /// Copy the attachment's identity back into the host columns after a
    /// save or revert settled it
    pub(crate) fn sync_columns(&mut self) {
        if let Some(attachment) = &self.attachment {
            if let Some(id) = attachment.id() {
                self.attachment_id = Some(id);
            }
            if let Some(version) = attachment.draft_version() {
                self.attachment_version = Some(version);
            }
        }
    }

    /// The upload waiting to be saved, staged or already on the attachment
    pub fn file(&self) -> Option<&UploadedFile> {
        self.staging
            .file
            .as_ref()
            .or_else(|| self.attachment.as_ref().and_then(|a| a.temp_file()))
    }

    pub fn file_name(&self) -> Option<&str> {
        self.staging
            .file_name
            .as_deref()
            .or_else(|| self.attachment.as_ref().and_then(|a| a.file_name()))
    }

    pub fn file_path(&self) -> Option<&str> {
        self.staging
            .file_path
            .as_deref()
            .or_else(|| self.attachment.as_ref().and_then(|a| a.file_path()))
    }

    pub fn section_id(&self) -> Option<Id> {
        self.staging
            .section_id
            .or_else(|| self.attachment.as_ref().and_then(|a| a.section_id()))
    }

    pub fn section(&self) -> Option<&Section> {
        self.staging
            .section
            .as_ref()
            .or_else(|| self.attachment.as_ref().and_then(|a| a.section()))
    }

    /// Stage an upload for the next save
    pub fn set_file(&mut self, file: UploadedFile) {
        if self.file() != Some(&file) {
            self.staging.dirty = true;
        }
        self.staging.file = Some(file);
    }

    pub fn set_file_name(&mut self, file_name: impl Into<String>) {
        let file_name = file_name.into();
        if self.file_name() != Some(file_name.as_str()) {
            self.staging.dirty = true;
        }
        self.staging.file_name = Some(file_name);
    }

    /// Stage a storage path. The path is sanitized before it is compared or
    /// stored, so equivalent inputs never register as a change.
    pub fn set_file_path(&mut self, file_path: impl Into<String>) {
        let file_path = sanitize_file_path(&file_path.into());
        if self.file_path() != Some(file_path.as_str()) {
            self.staging.dirty = true;
        }
        self.staging.file_path = Some(file_path);
    }

    pub fn set_section_id(&mut self, section_id: Id) {
        if self.section_id() != Some(section_id) {
            self.staging.dirty = true;
        }
        self.staging.section_id = Some(section_id);
    }

    /// Stage a section, keeping the staged section id in step
    pub fn set_section(&mut self, section: Section) {
        if self.section() != Some(&section) {
            self.staging.dirty = true;
        }
        self.staging.section_id = section.id;
        self.staging.section = Some(section);
    }

    /// Whether any staged edit differed from what was already visible
    pub fn is_dirty(&self) -> bool {
        self.staging.dirty
    }

    pub(crate) fn take_staged_file(&mut self) -> Option<UploadedFile> {
        self.staging.file.take()
    }

    /// Drop all staged edits and the dirty flag
    pub fn clear_staging(&mut self) {
        self.staging = AttachmentStaging::default();
    }
}
