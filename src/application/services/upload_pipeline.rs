//! Single-file upload pipeline against the object storage provider.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::application::errors::UploadError;
use crate::domain::entities::FileInput;
use crate::domain::storage::{ObjectStorage, ProviderError};

/// Ways of turning an uploaded object into a public address, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddressStrategy {
    Publish,
    Download,
}

const ADDRESS_STRATEGIES: [AddressStrategy; 2] =
    [AddressStrategy::Publish, AddressStrategy::Download];

/// Drives one file through destination request, byte transfer and
/// public address resolution.
///
/// Every provider call is bounded by `call_timeout`; a timeout counts as a
/// failure of the step it interrupted. Failures never leave this pipeline
/// other than as an [`UploadError`] value.
pub struct UploadPipeline {
    storage: Arc<dyn ObjectStorage>,
    call_timeout: Duration,
}

impl UploadPipeline {
    pub fn new(storage: Arc<dyn ObjectStorage>, call_timeout: Duration) -> Self {
        Self {
            storage,
            call_timeout,
        }
    }

    /// Uploads `file` and returns its public address.
    ///
    /// # Errors
    ///
    /// - [`UploadError::UploadLink`] if no upload destination was obtained
    /// - [`UploadError::Transfer`] if the bytes were not accepted
    /// - [`UploadError::AddressResolution`] if neither publish nor download yields an address
    pub async fn run(&self, file: FileInput) -> Result<String, UploadError> {
        let FileInput { filename, content } = file;
        let remote_path = remote_path_for(&filename);

        let destination = self
            .bounded(self.storage.request_upload_destination(&remote_path))
            .await
            .and_then(|href| non_empty(href).ok_or_else(|| "empty upload link".to_string()))
            .map_err(|reason| UploadError::UploadLink {
                filename: filename.clone(),
                reason,
            })?;

        self.bounded(self.storage.transfer_bytes(&destination, content))
            .await
            .map_err(|reason| UploadError::Transfer {
                filename: filename.clone(),
                reason,
            })?;

        for strategy in ADDRESS_STRATEGIES {
            match self.resolve_with(strategy, &remote_path).await {
                Ok(Some(address)) => {
                    tracing::debug!(%filename, ?strategy, "Resolved public address");
                    return Ok(address);
                }
                Ok(None) => {
                    tracing::debug!(%filename, ?strategy, "No address granted, trying next strategy");
                }
                Err(reason) => {
                    tracing::debug!(%filename, ?strategy, %reason, "Address strategy failed");
                }
            }
        }

        Err(UploadError::AddressResolution { filename })
    }

    async fn resolve_with(
        &self,
        strategy: AddressStrategy,
        remote_path: &str,
    ) -> Result<Option<String>, String> {
        let address = match strategy {
            AddressStrategy::Publish => self.bounded(self.storage.publish(remote_path)).await?,
            AddressStrategy::Download => {
                self.bounded(self.storage.download_address(remote_path))
                    .await?
            }
        };

        Ok(address.and_then(non_empty))
    }

    /// Awaits a provider call under the per-call timeout.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, ProviderError>>,
    ) -> Result<T, String> {
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(_) => Err(format!("timed out after {}s", self.call_timeout.as_secs_f32())),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Builds a collision-free remote path for a file.
///
/// Same-named files uploaded concurrently get distinct paths thanks to the
/// random prefix. Path separators in the name are flattened.
pub fn remote_path_for(filename: &str) -> String {
    let name: String = filename
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    let name = if name.is_empty() { "file".to_string() } else { name };

    format!("app:/{}_{}", Uuid::new_v4().simple(), name)
}
