//! Yandex Disk REST API client.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::AUTHORIZATION;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::storage::{ObjectStorage, ProviderError};

/// Default resources endpoint of the Yandex Disk REST API.
pub const DEFAULT_API_BASE: &str = "https://cloud-api.yandex.net/v1/disk/resources";

/// Link object returned by the upload and download endpoints.
#[derive(Debug, Deserialize)]
struct LinkResponse {
    href: Option<String>,
}

/// Subset of resource metadata carrying the public address.
#[derive(Debug, Deserialize)]
struct ResourceMeta {
    public_url: Option<String>,
}

/// Yandex Disk client sharing one connection pool across all uploads.
///
/// Cloning is cheap; clones share the pool.
#[derive(Clone)]
pub struct YandexDiskClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl std::fmt::Debug for YandexDiskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YandexDiskClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl YandexDiskClient {
    /// Creates a client for `api_base` authenticated with an OAuth `token`.
    ///
    /// `timeout` bounds every request, including body transfer.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(
        api_base: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn authorization(&self) -> String {
        format!("OAuth {}", self.token)
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!("{}{}", self.api_base, suffix)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        suffix: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let response = self
            .http
            .get(self.endpoint(suffix))
            .header(AUTHORIZATION, self.authorization())
            .query(query)
            .send()
            .await
            .map_err(transport)?;

        let response = ensure_success(response).await?;
        response.json().await.map_err(transport)
    }
}

fn transport(e: reqwest::Error) -> ProviderError {
    ProviderError::Transport(e.to_string())
}

/// Passes a successful response through, or turns it into [`ProviderError::Status`].
async fn ensure_success(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl ObjectStorage for YandexDiskClient {
    async fn request_upload_destination(&self, remote_path: &str) -> Result<String, ProviderError> {
        let link: LinkResponse = self
            .get_json("/upload", &[("path", remote_path), ("overwrite", "true")])
            .await?;

        link.href.ok_or(ProviderError::MissingField("href"))
    }

    async fn transfer_bytes(&self, destination: &str, content: Bytes) -> Result<(), ProviderError> {
        let response = self
            .http
            .put(destination)
            .body(content)
            .send()
            .await
            .map_err(transport)?;

        ensure_success(response).await?;
        Ok(())
    }

    async fn publish(&self, remote_path: &str) -> Result<Option<String>, ProviderError> {
        let response = self
            .http
            .put(self.endpoint("/publish"))
            .header(AUTHORIZATION, self.authorization())
            .query(&[("path", remote_path)])
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response).await?;

        let meta: ResourceMeta = self
            .get_json("", &[("path", remote_path), ("fields", "public_url")])
            .await?;

        Ok(meta.public_url)
    }

    async fn download_address(&self, remote_path: &str) -> Result<Option<String>, ProviderError> {
        let link: LinkResponse = self.get_json("/download", &[("path", remote_path)]).await?;
        Ok(link.href)
    }

    async fn health_check(&self) -> bool {
        let response = self
            .http
            .get(self.endpoint(""))
            .header(AUTHORIZATION, self.authorization())
            .query(&[("path", "app:/"), ("limit", "0")])
            .send()
            .await;

        match response {
            Ok(r) => r.status().is_success() || r.status() == StatusCode::NOT_FOUND,
            Err(e) => {
                tracing::warn!(error = %e, "Storage provider health check failed");
                false
            }
        }
    }
}
