#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use sqlx::PgPool;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use yacut::application::services::{BatchUploadOrchestrator, RegistrationService, UploadPipeline};
use yacut::domain::storage::{ObjectStorage, ProviderError};
use yacut::infrastructure::persistence::PgMappingRepository;
use yacut::state::AppState;

pub const BASE_URL: &str = "http://short.test";

pub async fn create_test_mapping(pool: &PgPool, short: &str, original: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO url_map (original, short) VALUES ($1, $2) RETURNING id")
        .bind(original)
        .bind(short)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_mappings(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url_map")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn registration_service(pool: PgPool) -> Arc<RegistrationService<PgMappingRepository>> {
    let repository = Arc::new(PgMappingRepository::new(Arc::new(pool)));
    Arc::new(RegistrationService::new(repository, BASE_URL))
}

/// State with file uploads disabled.
pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(
        registration_service(pool),
        Arc::new(BatchUploadOrchestrator::disabled()),
        None,
    )
}

/// State whose uploads go to `storage`.
pub fn create_test_state_with_storage(pool: PgPool, storage: Arc<FakeStorage>) -> AppState {
    let storage: Arc<dyn ObjectStorage> = storage;
    let pipeline = UploadPipeline::new(Arc::clone(&storage), Duration::from_secs(5));

    AppState::new(
        registration_service(pool),
        Arc::new(BatchUploadOrchestrator::new(Arc::new(pipeline))),
        Some(storage),
    )
}

/// In-memory storage provider.
///
/// Transfers of files whose name is listed in `failing` are rejected with a
/// 500; every accepted object is published under `https://disk.test/`.
#[derive(Default)]
pub struct FakeStorage {
    pub failing: Vec<String>,
    pub healthy: bool,
    pub transfers: AtomicUsize,
}

impl FakeStorage {
    pub fn healthy() -> Self {
        Self {
            healthy: true,
            ..Default::default()
        }
    }

    pub fn failing(names: &[&str]) -> Self {
        Self {
            failing: names.iter().map(|n| n.to_string()).collect(),
            healthy: true,
            ..Default::default()
        }
    }

    pub fn transfer_count(&self) -> usize {
        self.transfers.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn request_upload_destination(&self, remote_path: &str) -> Result<String, ProviderError> {
        Ok(format!("https://uploader.test/{remote_path}"))
    }

    async fn transfer_bytes(&self, destination: &str, _content: Bytes) -> Result<(), ProviderError> {
        self.transfers.fetch_add(1, Ordering::SeqCst);

        if self
            .failing
            .iter()
            .any(|name| destination.ends_with(&format!("_{name}")))
        {
            return Err(ProviderError::Status {
                status: 500,
                body: "upload rejected".to_string(),
            });
        }
        Ok(())
    }

    async fn publish(&self, remote_path: &str) -> Result<Option<String>, ProviderError> {
        let name = remote_path.trim_start_matches("app:/");
        Ok(Some(format!("https://disk.test/{name}")))
    }

    async fn download_address(&self, _remote_path: &str) -> Result<Option<String>, ProviderError> {
        Ok(None)
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }
}
