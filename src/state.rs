//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{BatchUploadOrchestrator, RegistrationService};
use crate::domain::storage::ObjectStorage;
use crate::infrastructure::persistence::PgMappingRepository;

#[derive(Clone)]
pub struct AppState {
    pub registration: Arc<RegistrationService<PgMappingRepository>>,
    pub uploads: Arc<BatchUploadOrchestrator>,
    /// Storage provider, `None` when no credentials are configured.
    pub storage: Option<Arc<dyn ObjectStorage>>,
}

impl AppState {
    pub fn new(
        registration: Arc<RegistrationService<PgMappingRepository>>,
        uploads: Arc<BatchUploadOrchestrator>,
        storage: Option<Arc<dyn ObjectStorage>>,
    ) -> Self {
        Self {
            registration,
            uploads,
            storage,
        }
    }
}
