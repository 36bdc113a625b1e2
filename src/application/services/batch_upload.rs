//! Concurrent batch upload with per-file failure isolation.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::application::errors::{BatchUploadError, FileShareError, UploadError};
use crate::application::services::{RegistrationService, UploadPipeline};
use crate::domain::entities::{FileInput, Mapping, UploadOutcome};
use crate::domain::repositories::MappingRepository;

/// Final per-file result of a batch: a committed mapping or the reason there is none.
#[derive(Debug)]
pub struct SharedFile {
    pub filename: String,
    pub result: Result<Mapping, FileShareError>,
}

/// Runs one [`UploadPipeline`] per file concurrently.
///
/// All pipelines share one provider client. Each pipeline's failure is
/// captured as a value in its own slot, so one file never cancels or
/// corrupts its siblings. The orchestrator waits for every pipeline and
/// returns outcomes in input order.
pub struct BatchUploadOrchestrator {
    pipeline: Option<Arc<UploadPipeline>>,
}

impl BatchUploadOrchestrator {
    pub fn new(pipeline: Arc<UploadPipeline>) -> Self {
        Self {
            pipeline: Some(pipeline),
        }
    }

    /// Creates an orchestrator without storage credentials.
    ///
    /// Every batch fails with [`BatchUploadError::NotConfigured`].
    pub fn disabled() -> Self {
        Self { pipeline: None }
    }

    /// Uploads all files concurrently and returns one outcome per file.
    ///
    /// # Errors
    ///
    /// Returns [`BatchUploadError::NotConfigured`] if storage credentials are
    /// missing. Individual file failures are reported inside the outcomes.
    pub async fn run_batch(
        &self,
        files: Vec<FileInput>,
    ) -> Result<Vec<UploadOutcome>, BatchUploadError> {
        let pipeline = self
            .pipeline
            .as_ref()
            .ok_or(BatchUploadError::NotConfigured)?;

        let mut slots: Vec<(String, JoinHandle<Result<String, UploadError>>)> =
            Vec::with_capacity(files.len());

        for file in files {
            let filename = file.filename.clone();
            let pipeline = Arc::clone(pipeline);
            slots.push((filename, tokio::spawn(async move { pipeline.run(file).await })));
        }

        let mut outcomes = Vec::with_capacity(slots.len());

        for (filename, handle) in slots {
            let result = handle.await.unwrap_or_else(|e| {
                Err(UploadError::Aborted {
                    filename: filename.clone(),
                    reason: e.to_string(),
                })
            });

            if let Err(e) = &result {
                tracing::warn!(%filename, step = e.step(), error = %e, "File upload failed");
            }

            outcomes.push(UploadOutcome { filename, result });
        }

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        tracing::info!(total = outcomes.len(), failed, "Batch upload finished");

        Ok(outcomes)
    }

    /// Uploads all files and registers a generated short code for each
    /// successfully uploaded one.
    ///
    /// Registration failures are reported per file, like upload failures.
    ///
    /// # Errors
    ///
    /// Returns [`BatchUploadError::NotConfigured`] if storage credentials are missing.
    pub async fn upload_and_register<R: MappingRepository>(
        &self,
        files: Vec<FileInput>,
        registration: &RegistrationService<R>,
    ) -> Result<Vec<SharedFile>, BatchUploadError> {
        let outcomes = self.run_batch(files).await?;
        let mut shared = Vec::with_capacity(outcomes.len());

        for UploadOutcome { filename, result } in outcomes {
            let result = match result {
                Ok(address) => registration
                    .register(&address, None)
                    .await
                    .map_err(FileShareError::from),
                Err(e) => Err(e.into()),
            };

            if let Err(FileShareError::Registration(e)) = &result {
                tracing::warn!(%filename, error = %e, "Uploaded file could not be registered");
            }

            shared.push(SharedFile { filename, result });
        }

        Ok(shared)
    }
}
