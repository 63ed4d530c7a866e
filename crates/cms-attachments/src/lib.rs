//! # cms-attachments
//!
//! Versioned, sectioned file attachments for CMS RS.
//!
//! ## Features
//!
//! - Attachment metadata with its own change tracking and validation
//! - Version history: every save appends a draft version, publish marks
//!   the live one, revert copies an old snapshot forward
//! - Uploaded-file handles with content type detection
//! - File path sanitization rules
//!
//! The attachment knows nothing about the records that own it; the
//! ownership protocol lives in `cms-behaviors`.

pub mod model;
pub mod paths;
pub mod store;
pub mod upload;
pub mod version;

pub use model::{Attachment, AttachmentErrors, AttachmentField};
pub use paths::{sanitize_file_path, DEFAULT_ATTACHMENT_ROOT};
pub use store::{
    AttachmentStore, AttachmentStoreError, AttachmentStoreResult, MemoryAttachmentStore,
};
pub use upload::UploadedFile;
pub use version::AttachmentVersion;
