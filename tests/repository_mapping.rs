mod common;

use sqlx::PgPool;
use std::sync::Arc;
use yacut::domain::entities::NewMapping;
use yacut::domain::repositories::{MappingRepository, StoreError};
use yacut::infrastructure::persistence::PgMappingRepository;

fn repo(pool: &PgPool) -> PgMappingRepository {
    PgMappingRepository::new(Arc::new(pool.clone()))
}

fn new_mapping(short: &str, original: &str) -> NewMapping {
    NewMapping {
        original: original.to_string(),
        short: short.to_string(),
    }
}

#[sqlx::test]
async fn test_insert_mapping(pool: PgPool) {
    let result = repo(&pool)
        .insert(new_mapping("abc123", "https://example.com/a?b=c"))
        .await;

    let mapping = result.unwrap();
    assert_eq!(mapping.short, "abc123");
    assert_eq!(mapping.original, "https://example.com/a?b=c");
    assert!(mapping.id > 0);
}

#[sqlx::test]
async fn test_insert_duplicate_is_unique_violation(pool: PgPool) {
    common::create_test_mapping(&pool, "taken", "https://example.com/first").await;

    let result = repo(&pool)
        .insert(new_mapping("taken", "https://example.com/second"))
        .await;

    assert!(matches!(result, Err(StoreError::UniqueViolation(code)) if code == "taken"));

    let existing = repo(&pool).find_by_code("taken").await.unwrap().unwrap();
    assert_eq!(existing.original, "https://example.com/first");
    assert_eq!(common::count_mappings(&pool).await, 1);
}

#[sqlx::test]
async fn test_insert_codes_are_case_sensitive(pool: PgPool) {
    let repo = repo(&pool);

    repo.insert(new_mapping("AbC", "https://example.com/1"))
        .await
        .unwrap();
    let result = repo.insert(new_mapping("abc", "https://example.com/2")).await;

    assert!(result.is_ok());
}

#[sqlx::test]
async fn test_insert_malformed_code_is_storage_error(pool: PgPool) {
    let result = repo(&pool)
        .insert(new_mapping("bad-code", "https://example.com"))
        .await;

    assert!(matches!(result, Err(StoreError::Storage(_))));
    assert_eq!(common::count_mappings(&pool).await, 0);
}

#[sqlx::test]
async fn test_exists(pool: PgPool) {
    common::create_test_mapping(&pool, "present", "https://example.com").await;
    let repo = repo(&pool);

    assert!(repo.exists("present").await.unwrap());
    assert!(!repo.exists("absent").await.unwrap());
}

#[sqlx::test]
async fn test_find_by_code_not_found(pool: PgPool) {
    let result = repo(&pool).find_by_code("notfound").await;

    assert!(result.unwrap().is_none());
}

#[sqlx::test]
async fn test_count(pool: PgPool) {
    let repo = repo(&pool);
    assert_eq!(repo.count().await.unwrap(), 0);

    common::create_test_mapping(&pool, "one", "https://example.com/1").await;
    common::create_test_mapping(&pool, "two", "https://example.com/2").await;

    assert_eq!(repo.count().await.unwrap(), 2);
}
