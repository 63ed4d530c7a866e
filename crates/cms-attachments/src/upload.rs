//! Uploaded file handles

use bytes::Bytes;

/// An uploaded file waiting to be persisted.
///
/// Carries the client-supplied file name, the raw payload, and a content
/// type guessed from the name unless the caller supplies one. Handles are
/// transient: they live in a record's attachment slot until the save that
/// consumes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original file name as submitted by the client
    pub file_name: String,
    /// MIME content type
    pub content_type: String,
    /// Raw file payload
    pub data: Bytes,
}

impl UploadedFile {
    /// Create an upload handle, guessing the content type from the name
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            file_name,
            content_type,
            data: data.into(),
        }
    }

    /// Override the guessed content type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Payload size in bytes
    pub fn size(&self) -> i64 {
        self.data.len() as i64
    }

    /// File name with any client-supplied directory part stripped
    pub fn base_name(&self) -> &str {
        self.file_name
            .rsplit('/')
            .next()
            .unwrap_or(self.file_name.as_str())
    }
}
