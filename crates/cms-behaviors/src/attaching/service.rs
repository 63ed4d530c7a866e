//! Attachment lifecycle orchestration.
//!
//! `AttachingService` drives a host record's attachment through the save
//! cycle: `process` validates and prepares the attachment before the host
//! is persisted, `update_if_changed` pushes it into the store alongside
//! the host save, and `save` runs both and then drops the staged edits.
//! Publish, revert, and version restoration delegate to the store.

use std::sync::Arc;

use cms_attachments::{
    AttachmentField, AttachmentStore, AttachmentStoreError, AttachmentStoreResult,
    AttachmentVersion,
};
use cms_core::error::ValidationErrors;
use cms_core::result::ServiceResult;
use cms_core::traits::{Id, Identifiable};
use cms_sections::SectionStore;
use tracing::{debug, instrument, warn};

use super::derive::{DefaultPathDeriver, DefaultSectionDeriver, PathDeriver, SectionDeriver};
use super::host::Attachable;

/// What happened to the attachment during a host save.
///
/// Store failures are reported here rather than failing the host save;
/// callers that need the attachment persisted check the outcome.
#[derive(Debug)]
pub enum AttachmentSync {
    /// The record has no attachment to synchronize
    Absent,
    /// A new draft version was saved
    Saved(AttachmentVersion),
    /// A prior version was copied forward as a new draft
    Reverted(AttachmentVersion),
    /// Nothing changed, so nothing was written
    Skipped,
    /// The store rejected the write; the host save itself proceeds
    Failed(AttachmentStoreError),
}

/// Link to an attachment's file, as rendered for end users
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentLink {
    /// The live file, served straight from its storage path
    Direct(String),
    /// The versioned preview route used for drafts and non-live views
    Versioned { id: Id, version: AttachmentVersion },
}

impl std::fmt::Display for AttachmentLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachmentLink::Direct(path) => write!(f, "{}", path),
            AttachmentLink::Versioned { id, version } => {
                write!(f, "/cms/attachments/{}?version={}", id, version)
            }
        }
    }
}

/// Coordinates a host record's attachment through validation, saves,
/// reverts, and publishes.
///
/// Path and section strategies default to filing uploads under a fixed
/// root path and the root section; hosts with their own conventions swap
/// in custom derivers.
pub struct AttachingService<H: Attachable> {
    store: Arc<dyn AttachmentStore>,
    path_deriver: Box<dyn PathDeriver<H>>,
    section_deriver: Box<dyn SectionDeriver<H>>,
    archivable: bool,
}

impl<H: Attachable> AttachingService<H> {
    /// Service with the default path and section strategies
    pub fn new(store: Arc<dyn AttachmentStore>, sections: Arc<dyn SectionStore>) -> Self {
        Self {
            store,
            path_deriver: Box::new(DefaultPathDeriver::new()),
            section_deriver: Box::new(DefaultSectionDeriver::new(sections)),
            archivable: false,
        }
    }

    /// Replace the path strategy
    pub fn with_path_deriver(mut self, deriver: impl PathDeriver<H> + 'static) -> Self {
        self.path_deriver = Box::new(deriver);
        self
    }

    /// Replace the section strategy
    pub fn with_section_deriver(mut self, deriver: impl SectionDeriver<H> + 'static) -> Self {
        self.section_deriver = Box::new(deriver);
        self
    }

    /// Propagate the host's archived flag onto the attachment during saves
    pub fn with_archivable(mut self, archivable: bool) -> Self {
        self.archivable = archivable;
        self
    }

    /// Validate the host's attachment state and prepare the attachment for
    /// a save.
    ///
    /// Moves any staged upload onto the attachment, runs the path and
    /// section strategies, and validates the result. Attachment errors are
    /// mapped onto the host's error fields: path problems onto
    /// `attachment_file_path`, everything else onto `attachment_file`. The
    /// attachment stays installed in the slot either way.
    pub fn process(&self, host: &mut H) -> Result<(), ValidationErrors> {
        let slot = host.attaching();
        if slot.attachment().is_none() && slot.file().is_none() {
            // A staged path or section with no file to go with it is a
            // usage error; an untouched slot just means no attachment.
            if slot.file_path().is_some() || slot.section_id().is_some() {
                let mut errors = ValidationErrors::new();
                errors.add("attachment_file", "You must upload a file");
                return Err(errors);
            }
            return Ok(());
        }

        let mut attachment = host.attaching_mut().take_attachment().unwrap_or_default();
        if let Some(file) = host.attaching_mut().take_staged_file() {
            attachment.set_temp_file(file);
        }

        self.path_deriver.derive_path(host, &mut attachment);
        if attachment.file_path().map_or(true, |p| p.trim().is_empty()) {
            let mut errors = ValidationErrors::new();
            errors.add("attachment_file_path", "File Name is required for attachment");
            host.attaching_mut().set_attachment(attachment);
            return Err(errors);
        }

        self.section_deriver.derive_section(host, &mut attachment);
        if attachment.section().is_none() {
            let mut errors = ValidationErrors::new();
            errors.add("attachment_file", "Section is required for attachment");
            host.attaching_mut().set_attachment(attachment);
            return Err(errors);
        }

        let outcome = match attachment.validate() {
            Ok(()) => Ok(()),
            Err(attachment_errors) => {
                let mut errors = ValidationErrors::new();
                for (field, message) in attachment_errors.iter() {
                    match field {
                        AttachmentField::FilePath => errors.add("attachment_file_path", message),
                        _ => errors.add("attachment_file", message),
                    }
                }
                Err(errors)
            }
        };
        host.attaching_mut().set_attachment(attachment);
        outcome
    }

    /// Push the attachment into the store alongside a host save.
    ///
    /// Reverts win over pending edits; otherwise the attachment is saved
    /// when the host is new, a field changed, or an upload is pending. The
    /// host's attachment columns are refreshed from the attachment in
    /// every case.
    pub fn update_if_changed(&self, host: &mut H) -> AttachmentSync {
        debug!("updating attachment if changed");

        let archived = host.is_archived();
        let revert_target = host.revert_target();
        let host_is_new = host.is_new_record();

        let slot = host.attaching_mut();
        let Some(attachment) = slot.attachment_mut() else {
            return AttachmentSync::Absent;
        };

        if self.archivable {
            attachment.set_archived(archived);
        }

        let sync = if let Some(target) = revert_target {
            match attachment.id() {
                Some(id) => match self.store.revert_to(id, target.attachment_version) {
                    Ok(version) => match self.store.find(id) {
                        Ok(reverted) => {
                            *attachment = reverted;
                            AttachmentSync::Reverted(version)
                        }
                        Err(err) => {
                            warn!(attachment_id = id, error = %err, "reverted attachment reload failed");
                            AttachmentSync::Failed(err)
                        }
                    },
                    Err(err) => {
                        warn!(attachment_id = id, error = %err, "attachment revert failed");
                        AttachmentSync::Failed(err)
                    }
                },
                None => {
                    warn!("revert requested for an unsaved attachment");
                    AttachmentSync::Skipped
                }
            }
        } else if host_is_new || attachment.is_changed() || attachment.has_pending_upload() {
            match self.store.save(attachment) {
                Ok(version) => {
                    debug!(version = %version, "attachment saved");
                    AttachmentSync::Saved(version)
                }
                Err(err) => {
                    warn!(error = %err, "attachment save failed");
                    AttachmentSync::Failed(err)
                }
            }
        } else {
            AttachmentSync::Skipped
        };

        slot.sync_columns();
        sync
    }

    /// Run the full save cycle for the host's attachment state.
    ///
    /// Staged edits are dropped afterwards whether or not the save went
    /// through; a failed submission does not leak into the next one.
    #[instrument(skip(self, host))]
    pub fn save(&self, host: &mut H) -> ServiceResult<AttachmentSync> {
        let result = match self.process(host) {
            Ok(()) => ServiceResult::success(self.update_if_changed(host)),
            Err(errors) => ServiceResult::failure(errors),
        };
        host.attaching_mut().clear_staging();
        result
    }

    /// Publish the host's attachment when the host itself is published
    pub fn publish(&self, host: &H) -> AttachmentStoreResult<()> {
        if let Some(id) = host.attaching().attachment_id() {
            let version = self.store.publish(id)?;
            debug!(attachment_id = id, version = %version, "attachment published");
        }
        Ok(())
    }

    /// Reload the attachment snapshot the host's columns point at.
    ///
    /// Used after the host itself is resolved to a historical version, so
    /// the attachment shown matches the host version being viewed.
    pub fn restore_as_of_version(&self, host: &mut H) -> AttachmentStoreResult<()> {
        let id = host.attaching().attachment_id();
        let version = host.attaching().attachment_version();
        if let (Some(id), Some(version)) = (id, version) {
            let attachment = self.store.as_of_version(id, version)?;
            host.attaching_mut().set_attachment(attachment);
        }
        Ok(())
    }

    /// Attachment file size in kilobytes, two decimals, or `"?"` when no
    /// attachment is loaded
    pub fn file_size(&self, host: &H) -> String {
        match host.attaching().attachment() {
            Some(attachment) => format!("{:.2}", attachment.file_size() as f64 / 1024.0),
            None => "?".to_string(),
        }
    }

    /// Link for rendering the host's attachment, if there is one.
    ///
    /// Published hosts viewed live link straight to the file path; drafts
    /// and historical views link through the versioned preview route.
    pub fn attachment_link(&self, host: &H) -> Option<AttachmentLink> {
        let slot = host.attaching();
        if host.is_published() && host.is_live_version() {
            slot.file_path()
                .map(|path| AttachmentLink::Direct(path.to_string()))
        } else {
            let id = slot.attachment_id()?;
            let version = slot.attachment_version()?;
            Some(AttachmentLink::Versioned { id, version })
        }
    }
}
