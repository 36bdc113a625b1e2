//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::{MappingRepository, StoreError};
use crate::utils::db_error::is_unique_violation_on_code;

/// PostgreSQL repository for short code mappings.
///
/// Uniqueness of `short` is enforced by the `url_map_short_key` constraint.
/// Inserts run in a transaction that is rolled back on any failure.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn exists(&self, short: &str) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM url_map WHERE short = $1)")
                .bind(short)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, StoreError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, Mapping>(
            r#"
            INSERT INTO url_map (original, short)
            VALUES ($1, $2)
            RETURNING id, original, short, created_at
            "#,
        )
        .bind(&new_mapping.original)
        .bind(&new_mapping.short)
        .fetch_one(&mut *tx)
        .await;

        let mapping = match inserted {
            Ok(mapping) => mapping,
            Err(e) if is_unique_violation_on_code(&e) => {
                return Err(StoreError::UniqueViolation(new_mapping.short));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to insert mapping");
                return Err(e.into());
            }
        };

        tx.commit().await?;

        Ok(mapping)
    }

    async fn find_by_code(&self, short: &str) -> Result<Option<Mapping>, StoreError> {
        let mapping = sqlx::query_as::<_, Mapping>(
            r#"
            SELECT id, original, short, created_at
            FROM url_map
            WHERE short = $1
            "#,
        )
        .bind(short)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(mapping)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_map")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
