//! Attachment version numbers

use serde::{Deserialize, Serialize};

/// Version number within an attachment's history.
///
/// Versions start at 1 and increase by one per saved draft; hosts record
/// the draft version they were saved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttachmentVersion(pub i32);

impl AttachmentVersion {
    pub fn new(version: i32) -> Self {
        Self(version)
    }

    pub fn initial() -> Self {
        Self(1)
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<i32> for AttachmentVersion {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

impl From<AttachmentVersion> for i32 {
    fn from(v: AttachmentVersion) -> Self {
        v.0
    }
}

impl std::fmt::Display for AttachmentVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
