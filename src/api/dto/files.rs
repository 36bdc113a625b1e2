//! DTOs for the batch file upload endpoint.

use serde::Serialize;

use crate::error::ErrorInfo;

/// Response containing batch upload results in input order.
#[derive(Debug, Serialize)]
pub struct FilesResponse {
    pub summary: BatchSummary,
    pub items: Vec<FileResultItem>,
}

/// Individual result for a file in the batch.
///
/// Uses untagged enum for cleaner JSON structure (no discriminator field).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum FileResultItem {
    Success { filename: String, short_link: String },
    Error { filename: String, error: ErrorInfo },
}

impl FileResultItem {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Summary statistics for batch processing.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn of(items: &[FileResultItem]) -> Self {
        let successful = items.iter().filter(|i| i.is_success()).count();
        Self {
            total: items.len(),
            successful,
            failed: items.len() - successful,
        }
    }
}
