//! Repository trait for short code mappings.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{Mapping, NewMapping};

/// Failures reported by a [`MappingRepository`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The short code was claimed by another record between the existence
    /// check and the insert.
    #[error("Short code '{0}' is already taken")]
    UniqueViolation(String),

    #[error("Storage failure: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

/// Repository interface for the persisted set of mappings.
///
/// The store enforces uniqueness of `short`; [`Self::exists`] is advisory
/// and an insert may still fail with [`StoreError::UniqueViolation`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Returns true if a mapping with this short code exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] on database errors.
    async fn exists(&self, short: &str) -> Result<bool, StoreError>;

    /// Inserts a new mapping atomically.
    ///
    /// On any failure the store is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if `short` is already taken.
    /// Returns [`StoreError::Storage`] on any other database error.
    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, StoreError>;

    /// Finds a mapping by its short code (exact, case-sensitive match).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] on database errors.
    async fn find_by_code(&self, short: &str) -> Result<Option<Mapping>, StoreError>;

    /// Counts all mappings.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] on database errors.
    async fn count(&self) -> Result<i64, StoreError>;
}
