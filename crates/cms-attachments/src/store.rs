//! Attachment persistence and version history

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use cms_core::traits::{Id, Identifiable};
use parking_lot::RwLock;
use thiserror::Error;

use crate::model::{Attachment, AttachmentErrors};
use crate::version::AttachmentVersion;

/// Store errors
#[derive(Debug, Error)]
pub enum AttachmentStoreError {
    #[error("Attachment not found: {0}")]
    NotFound(Id),
    #[error("Version {version} not found for attachment {id}")]
    VersionNotFound { id: Id, version: AttachmentVersion },
    #[error("Attachment is invalid: {0}")]
    Invalid(#[from] AttachmentErrors),
}

pub type AttachmentStoreResult<T> = Result<T, AttachmentStoreError>;

/// Persistence and version history for attachments.
///
/// Implementations keep one snapshot per version. Saving appends a new
/// draft version; reverting copies a prior snapshot forward as a fresh
/// draft; publishing marks the current draft as the live version served
/// to end consumers.
pub trait AttachmentStore: Send + Sync {
    /// Validate and persist the attachment, appending a new draft version.
    ///
    /// The attachment is updated in place: an ID is assigned on first save,
    /// a pending upload is consumed into the file metadata, and the draft
    /// version and change flag are refreshed. Returns the new draft version.
    fn save(&self, attachment: &mut Attachment) -> AttachmentStoreResult<AttachmentVersion>;

    /// Latest draft snapshot by ID
    fn find(&self, id: Id) -> AttachmentStoreResult<Attachment>;

    /// Snapshot of a specific version
    fn as_of_version(
        &self,
        id: Id,
        version: AttachmentVersion,
    ) -> AttachmentStoreResult<Attachment>;

    /// Copy an old version's snapshot forward as a new draft version.
    /// Returns the new draft version, not the one reverted to.
    fn revert_to(
        &self,
        id: Id,
        version: AttachmentVersion,
    ) -> AttachmentStoreResult<AttachmentVersion>;

    /// Mark the current draft as the live version and return it
    fn publish(&self, id: Id) -> AttachmentStoreResult<AttachmentVersion>;

    /// Currently published version, if the attachment was ever published
    fn live_version(&self, id: Id) -> AttachmentStoreResult<Option<AttachmentVersion>>;
}

#[derive(Default)]
struct VersionHistory {
    /// Snapshot per saved version, oldest first
    versions: Vec<Attachment>,
    live: Option<AttachmentVersion>,
}

impl VersionHistory {
    fn next_version(&self) -> AttachmentVersion {
        match self.versions.last().and_then(|a| a.draft_version()) {
            Some(last) => last.next(),
            None => AttachmentVersion::initial(),
        }
    }

    fn snapshot(&self, version: AttachmentVersion) -> Option<&Attachment> {
        self.versions
            .iter()
            .find(|a| a.draft_version() == Some(version))
    }
}

/// In-memory attachment store for tests and wiring
pub struct MemoryAttachmentStore {
    records: RwLock<HashMap<Id, VersionHistory>>,
    next_id: AtomicI64,
}

impl Default for MemoryAttachmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAttachmentStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl AttachmentStore for MemoryAttachmentStore {
    fn save(&self, attachment: &mut Attachment) -> AttachmentStoreResult<AttachmentVersion> {
        attachment.validate()?;

        let id = match attachment.id() {
            Some(id) => id,
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                attachment.assign_id(id);
                id
            }
        };

        if let Some(file) = attachment.take_temp_file() {
            attachment.set_file_size(file.size());
            attachment.set_file_type(file.content_type);
        }

        let mut records = self.records.write();
        let history = records.entry(id).or_default();
        let version = history.next_version();
        attachment.mark_saved(version);
        history.versions.push(attachment.clone());

        Ok(version)
    }

    fn find(&self, id: Id) -> AttachmentStoreResult<Attachment> {
        let records = self.records.read();
        records
            .get(&id)
            .and_then(|history| history.versions.last())
            .cloned()
            .ok_or(AttachmentStoreError::NotFound(id))
    }

    fn as_of_version(
        &self,
        id: Id,
        version: AttachmentVersion,
    ) -> AttachmentStoreResult<Attachment> {
        let records = self.records.read();
        let history = records.get(&id).ok_or(AttachmentStoreError::NotFound(id))?;
        history
            .snapshot(version)
            .cloned()
            .ok_or(AttachmentStoreError::VersionNotFound { id, version })
    }

    fn revert_to(
        &self,
        id: Id,
        version: AttachmentVersion,
    ) -> AttachmentStoreResult<AttachmentVersion> {
        let mut records = self.records.write();
        let history = records
            .get_mut(&id)
            .ok_or(AttachmentStoreError::NotFound(id))?;
        let mut draft = history
            .snapshot(version)
            .cloned()
            .ok_or(AttachmentStoreError::VersionNotFound { id, version })?;

        let next = history.next_version();
        draft.mark_saved(next);
        history.versions.push(draft);

        Ok(next)
    }

    fn publish(&self, id: Id) -> AttachmentStoreResult<AttachmentVersion> {
        let mut records = self.records.write();
        let history = records
            .get_mut(&id)
            .ok_or(AttachmentStoreError::NotFound(id))?;
        let version = history
            .versions
            .last()
            .and_then(|a| a.draft_version())
            .ok_or(AttachmentStoreError::NotFound(id))?;

        history.live = Some(version);
        Ok(version)
    }

    fn live_version(&self, id: Id) -> AttachmentStoreResult<Option<AttachmentVersion>> {
        let records = self.records.read();
        let history = records.get(&id).ok_or(AttachmentStoreError::NotFound(id))?;
        Ok(history.live)
    }
}
