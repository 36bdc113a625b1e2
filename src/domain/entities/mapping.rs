//! Mapping entity representing a short code bound to a target address.

use chrono::{DateTime, Utc};

/// A persisted short code → target address association.
///
/// Both `short` and `original` are immutable once the record exists.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Mapping {
    pub id: i64,
    pub original: String,
    pub short: String,
    pub created_at: DateTime<Utc>,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(id: i64, original: String, short: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            original,
            short,
            created_at,
        }
    }
}

/// Input data for inserting a new mapping.
///
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub original: String,
    pub short: String,
}
