//! Attachment model

use chrono::{DateTime, Utc};
use cms_core::traits::{Id, Identifiable, Timestamped};
use cms_sections::Section;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::upload::UploadedFile;
use crate::version::AttachmentVersion;

/// Attachment attributes that can fail validation.
///
/// Owning records remap these onto their own error fields, so the variant
/// set is part of the cross-entity contract: path problems surface on the
/// record's path field, everything else on its file field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentField {
    FilePath,
    Section,
}

/// Validation failures reported by the attachment itself
#[derive(Error, Debug, Default, Clone)]
#[error("Attachment validation failed: {entries:?}")]
pub struct AttachmentErrors {
    entries: Vec<(AttachmentField, String)>,
}

impl AttachmentErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: AttachmentField, message: impl Into<String>) {
        self.entries.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttachmentField, &str)> {
        self.entries.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// A versioned, sectioned file attachment.
///
/// Exactly one content record owns an attachment; the record drives its
/// lifecycle and the attachment tracks its own field changes so the owner
/// can tell whether a save is needed. Fields are private because every
/// write has to keep the change flag honest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    id: Option<Id>,
    file_path: Option<String>,
    section: Option<Section>,
    archived: bool,
    file_size: i64,
    file_type: Option<String>,
    draft_version: Option<AttachmentVersion>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Pending upload; consumed by the save that persists it
    #[serde(skip)]
    temp_file: Option<UploadedFile>,
    #[serde(skip)]
    changed: bool,
}

impl Default for Attachment {
    fn default() -> Self {
        Self::new()
    }
}

impl Attachment {
    /// Create an unsaved, empty attachment
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: None,
            file_path: None,
            section: None,
            archived: false,
            file_size: 0,
            file_type: None,
            draft_version: None,
            created_at: now,
            updated_at: now,
            temp_file: None,
            changed: false,
        }
    }

    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    /// Assign the storage path. Marks the attachment changed only when the
    /// path actually differs.
    pub fn set_file_path(&mut self, file_path: impl Into<String>) {
        let file_path = file_path.into();
        if self.file_path.as_deref() != Some(file_path.as_str()) {
            self.file_path = Some(file_path);
            self.changed = true;
        }
    }

    pub fn section(&self) -> Option<&Section> {
        self.section.as_ref()
    }

    pub fn section_id(&self) -> Option<Id> {
        self.section.as_ref().and_then(|s| s.id)
    }

    pub fn set_section(&mut self, section: Section) {
        if self.section.as_ref() != Some(&section) {
            self.section = Some(section);
            self.changed = true;
        }
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }

    pub fn set_archived(&mut self, archived: bool) {
        if self.archived != archived {
            self.archived = archived;
            self.changed = true;
        }
    }

    /// File size in bytes, recorded when an upload is persisted
    pub fn file_size(&self) -> i64 {
        self.file_size
    }

    /// MIME content type of the persisted file
    pub fn file_type(&self) -> Option<&str> {
        self.file_type.as_deref()
    }

    pub fn temp_file(&self) -> Option<&UploadedFile> {
        self.temp_file.as_ref()
    }

    /// Stage an upload. A pending upload is not column state, so this does
    /// not mark the attachment changed; saves check for it separately.
    pub fn set_temp_file(&mut self, file: UploadedFile) {
        self.temp_file = Some(file);
    }

    /// Take the pending upload out of its slot
    pub fn take_temp_file(&mut self) -> Option<UploadedFile> {
        self.temp_file.take()
    }

    pub fn has_pending_upload(&self) -> bool {
        self.temp_file.is_some()
    }

    pub fn draft_version(&self) -> Option<AttachmentVersion> {
        self.draft_version
    }

    /// Whether any column-backed field changed since the last save
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Base name of the stored path
    pub fn file_name(&self) -> Option<&str> {
        self.file_path
            .as_deref()
            .and_then(|p| p.rsplit('/').next())
            .filter(|name| !name.is_empty())
    }

    /// Extension of the stored file name
    pub fn file_extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        if !name.contains('.') {
            return None;
        }
        name.rsplit('.')
            .next()
            .filter(|ext| !ext.is_empty() && ext.len() <= 10)
    }

    /// The attachment's own validation rules: the path must be present and
    /// rooted, and the attachment must be filed under a section.
    pub fn validate(&self) -> Result<(), AttachmentErrors> {
        let mut errors = AttachmentErrors::new();

        match self.file_path.as_deref() {
            None => errors.add(AttachmentField::FilePath, "can't be blank"),
            Some(path) if path.trim().is_empty() => {
                errors.add(AttachmentField::FilePath, "can't be blank")
            }
            Some(path) if !path.starts_with('/') => {
                errors.add(AttachmentField::FilePath, "must start with /")
            }
            _ => {}
        }

        if self.section.is_none() {
            errors.add(AttachmentField::Section, "can't be blank");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub(crate) fn assign_id(&mut self, id: Id) {
        self.id = Some(id);
    }

    pub(crate) fn set_file_size(&mut self, size: i64) {
        self.file_size = size;
    }

    pub(crate) fn set_file_type(&mut self, file_type: String) {
        self.file_type = Some(file_type);
    }

    pub(crate) fn mark_saved(&mut self, version: AttachmentVersion) {
        self.draft_version = Some(version);
        self.changed = false;
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Attachment {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Attachment {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        Some(self.updated_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section() -> Section {
        let mut section = Section::new("My Site", "/");
        section.id = Some(1);
        section
    }

    #[test]
    fn test_setters_track_changes() {
        let mut attachment = Attachment::new();
        assert!(!attachment.is_changed());

        attachment.set_file_path("/attachments/a.txt");
        assert!(attachment.is_changed());
    }

    #[test]
    fn test_reassigning_same_value_is_not_a_change() {
        let mut attachment = Attachment::new();
        attachment.set_file_path("/attachments/a.txt");
        attachment.set_section(section());
        attachment.set_archived(true);
        attachment.mark_saved(AttachmentVersion::initial());
        assert!(!attachment.is_changed());

        attachment.set_file_path("/attachments/a.txt");
        attachment.set_section(section());
        attachment.set_archived(true);
        assert!(!attachment.is_changed());
    }

    #[test]
    fn test_pending_upload_is_not_a_field_change() {
        let mut attachment = Attachment::new();
        attachment.set_temp_file(UploadedFile::new("a.txt", "data"));

        assert!(attachment.has_pending_upload());
        assert!(!attachment.is_changed());
    }

    #[test]
    fn test_section_id_follows_section() {
        let mut attachment = Attachment::new();
        assert_eq!(attachment.section_id(), None);

        attachment.set_section(section());
        assert_eq!(attachment.section_id(), Some(1));
    }

    #[test]
    fn test_file_name_and_extension() {
        let mut attachment = Attachment::new();
        attachment.set_file_path("/attachments/reports/q1 summary.pdf");

        assert_eq!(attachment.file_name(), Some("q1 summary.pdf"));
        assert_eq!(attachment.file_extension(), Some("pdf"));

        attachment.set_file_path("/attachments/README");
        assert_eq!(attachment.file_extension(), None);
    }

    #[test]
    fn test_validate_requires_path_and_section() {
        let attachment = Attachment::new();
        let errors = attachment.validate().unwrap_err();

        let fields: Vec<_> = errors.iter().map(|(field, _)| field).collect();
        assert!(fields.contains(&AttachmentField::FilePath));
        assert!(fields.contains(&AttachmentField::Section));
    }

    #[test]
    fn test_validate_rejects_unrooted_path() {
        let mut attachment = Attachment::new();
        attachment.set_file_path("attachments/a.txt");
        attachment.set_section(section());

        let errors = attachment.validate().unwrap_err();
        let messages: Vec<_> = errors.iter().collect();
        assert_eq!(
            messages,
            vec![(AttachmentField::FilePath, "must start with /")]
        );
    }

    #[test]
    fn test_validate_accepts_complete_attachment() {
        let mut attachment = Attachment::new();
        attachment.set_file_path("/attachments/a.txt");
        attachment.set_section(section());

        assert!(attachment.validate().is_ok());
    }
}
