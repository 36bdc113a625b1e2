//! Mapping creation and resolution service.

use std::sync::Arc;

use crate::application::errors::RegistrationError;
use crate::application::services::CodeAllocator;
use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::{MappingRepository, StoreError};
use crate::utils::target_url::validate_target_url;

/// Service that turns a target address into a committed short mapping.
///
/// # Registration flow
///
/// `Received → CodeResolved → Inserted` on success, or
/// `Received → CodeResolved → ConflictOrStorageFailure` on failure.
///
/// Custom codes are inserted once; an insert-time conflict is reported to the
/// caller. Generated codes are re-drawn on an insert-time conflict, bounded by
/// the allocator's attempt cap.
pub struct RegistrationService<R: MappingRepository> {
    repository: Arc<R>,
    allocator: CodeAllocator<R>,
    base_url: String,
}

impl<R: MappingRepository> RegistrationService<R> {
    /// Creates a new registration service.
    ///
    /// `base_url` is the public prefix short links are built from.
    pub fn new(repository: Arc<R>, base_url: impl Into<String>) -> Self {
        let allocator = CodeAllocator::new(repository.clone());
        Self::with_allocator(repository, allocator, base_url)
    }

    /// Creates a service with a custom allocator policy.
    pub fn with_allocator(
        repository: Arc<R>,
        allocator: CodeAllocator<R>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            allocator,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Registers `original` under a custom or generated short code.
    ///
    /// A blank `custom_code` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::InvalidTarget`] if `original` is not a storable URL.
    /// Returns [`RegistrationError::InvalidCode`] for reserved or malformed custom codes.
    /// Returns [`RegistrationError::CodeConflict`] if the custom code is taken.
    /// Returns [`RegistrationError::GenerationExhausted`] if no free code was found.
    /// Returns [`RegistrationError::Storage`] on database errors.
    pub async fn register(
        &self,
        original: &str,
        custom_code: Option<&str>,
    ) -> Result<Mapping, RegistrationError> {
        validate_target_url(original)?;

        match custom_code.filter(|code| !code.trim().is_empty()) {
            Some(custom) => self.register_custom(original, custom).await,
            None => self.register_generated(original).await,
        }
    }

    async fn register_custom(
        &self,
        original: &str,
        custom: &str,
    ) -> Result<Mapping, RegistrationError> {
        let short = self.allocator.validate_custom(custom).await?;

        let mapping = self
            .repository
            .insert(NewMapping {
                original: original.to_string(),
                short,
            })
            .await?;

        tracing::info!(short = %mapping.short, "Registered custom short code");
        Ok(mapping)
    }

    async fn register_generated(&self, original: &str) -> Result<Mapping, RegistrationError> {
        let max_attempts = self.allocator.max_attempts();

        for attempt in 1..=max_attempts {
            let short = self.allocator.generate_unique().await?;

            match self
                .repository
                .insert(NewMapping {
                    original: original.to_string(),
                    short,
                })
                .await
            {
                Ok(mapping) => {
                    tracing::info!(short = %mapping.short, "Registered generated short code");
                    return Ok(mapping);
                }
                Err(StoreError::UniqueViolation(short)) => {
                    tracing::debug!(attempt, %short, "Generated code claimed concurrently, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::warn!(attempts = max_attempts, "Gave up inserting a generated short code");
        Err(RegistrationError::GenerationExhausted(max_attempts))
    }

    /// Resolves a short code to its mapping. Never mutates state.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(mapping))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Storage`] on database errors.
    pub async fn resolve(&self, short: &str) -> Result<Option<Mapping>, RegistrationError> {
        Ok(self.repository.find_by_code(short).await?)
    }

    /// Counts all registered mappings.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Storage`] on database errors.
    pub async fn count(&self) -> Result<i64, RegistrationError> {
        Ok(self.repository.count().await?)
    }

    /// Builds the public short link for a code.
    pub fn short_link(&self, short: &str) -> String {
        format!("{}/{}", self.base_url, short)
    }
}
