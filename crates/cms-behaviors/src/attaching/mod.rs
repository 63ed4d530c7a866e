//! Attachment ownership behavior
//!
//! A content record that owns an attachment carries an [`AttachmentSlot`]
//! and implements [`Attachable`]. The [`AttachingService`] then drives the
//! coupling protocol through the record's save cycle:
//!
//! 1. validation phase ([`AttachingService::process`]): make sure an
//!    in-memory attachment exists when the submission calls for one,
//!    transfer the pending upload, derive path and section, and surface
//!    validation failures on the record's own error fields;
//! 2. save phase ([`AttachingService::update_if_changed`]): persist or
//!    revert the attachment and record the resulting draft version on the
//!    record;
//! 3. cleanup: staged edits are dropped after every attempt.
//!
//! Path and section derivation are strategy slots ([`PathDeriver`],
//! [`SectionDeriver`]) so host types can replace the defaults without
//! touching the protocol itself.

mod derive;
mod host;
mod service;
mod slot;

pub use derive::{DefaultPathDeriver, DefaultSectionDeriver, PathDeriver, SectionDeriver};
pub use host::{Attachable, RevertTarget};
pub use service::{AttachingService, AttachmentLink, AttachmentSync};
pub use slot::AttachmentSlot;
