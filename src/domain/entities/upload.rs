//! Transient values flowing through the batch upload path.

use bytes::Bytes;

use crate::application::errors::UploadError;

/// One file received from the caller, fully buffered in memory.
#[derive(Debug, Clone)]
pub struct FileInput {
    pub filename: String,
    pub content: Bytes,
}

impl FileInput {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// Terminal result of one upload pipeline run.
///
/// `result` holds the public address on success. Never persisted.
#[derive(Debug)]
pub struct UploadOutcome {
    pub filename: String,
    pub result: Result<String, UploadError>,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
