//! Host-side contract for records that own an attachment

use cms_attachments::AttachmentVersion;
use cms_core::traits::Identifiable;

use super::slot::AttachmentSlot;

/// Prior host version selected for a revert, carrying the attachment
/// version that was recorded on that row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertTarget {
    pub attachment_version: AttachmentVersion,
}

/// A content record that may own one attachment.
///
/// `Identifiable` supplies the new-record check the save policy needs; the
/// remaining methods describe host capabilities, with defaults matching a
/// plain, non-archivable record whose in-memory state is live.
pub trait Attachable: Identifiable {
    /// The record's attachment slot
    fn attaching(&self) -> &AttachmentSlot;

    fn attaching_mut(&mut self) -> &mut AttachmentSlot;

    /// Whether the record is archived
    fn is_archived(&self) -> bool {
        false
    }

    /// Whether the record has been published
    fn is_published(&self) -> bool {
        false
    }

    /// Whether the record's in-memory state is the live version
    fn is_live_version(&self) -> bool {
        true
    }

    /// When the record is being reverted to a prior version, the target to
    /// restore the attachment from; `None` during normal saves
    fn revert_target(&self) -> Option<RevertTarget> {
        None
    }
}
