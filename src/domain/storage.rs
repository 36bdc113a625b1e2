//! Object storage provider contract.
//!
//! The upload pipeline drives a provider through three black-box steps:
//! obtain an upload destination, transfer the bytes, and resolve a public
//! address. Address resolution exposes two strategies (publish, download)
//! so the pipeline can chain them.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Failure of a single provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status.
    #[error("status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response did not carry the expected field.
    #[error("response is missing '{0}'")]
    MissingField(&'static str),

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
}

/// Storage provider reachable over one shared authenticated session.
///
/// Implementations must be safe for concurrent use by many pipelines.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Requests an upload destination for `remote_path`.
    async fn request_upload_destination(&self, remote_path: &str) -> Result<String, ProviderError>;

    /// Sends the full content to a destination from
    /// [`Self::request_upload_destination`].
    async fn transfer_bytes(&self, destination: &str, content: Bytes) -> Result<(), ProviderError>;

    /// Publishes the object and returns its public address, if one is granted.
    async fn publish(&self, remote_path: &str) -> Result<Option<String>, ProviderError>;

    /// Returns a direct download address for the object, if one is granted.
    async fn download_address(&self, remote_path: &str) -> Result<Option<String>, ProviderError>;

    /// Checks that the provider accepts the configured credentials.
    async fn health_check(&self) -> bool;
}
