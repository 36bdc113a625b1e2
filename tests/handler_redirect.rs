mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use sqlx::PgPool;
use yacut::api::handlers::redirect_handler;
use yacut::application::RegistrationError;

fn server(pool: PgPool) -> TestServer {
    let app = Router::new()
        .route("/{short}", get(redirect_handler))
        .with_state(common::create_test_state(pool));

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    common::create_test_mapping(&pool, "redirect1", "https://example.com/target").await;
    let server = server(pool);

    let response = server.get("/redirect1").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[sqlx::test]
async fn test_redirect_preserves_stored_address(pool: PgPool) {
    let original = "https://Example.com/Path/?q=a%20b&x=1#frag";
    common::create_test_mapping(&pool, "verbatim", original).await;
    let server = server(pool);

    let response = server.get("/verbatim").await;

    assert_eq!(response.header("location"), original);
}

#[sqlx::test]
async fn test_redirect_is_case_sensitive(pool: PgPool) {
    common::create_test_mapping(&pool, "CaseA", "https://example.com/upper").await;
    let server = server(pool);

    server.get("/casea").await.assert_status_not_found();
    server.get("/CaseA").await.assert_status(StatusCode::FOUND);
}

#[sqlx::test]
async fn test_redirect_not_found(pool: PgPool) {
    let server = server(pool);

    let response = server.get("/notfound").await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_registered_targets_are_redirectable(pool: PgPool) {
    let registration = common::registration_service(pool.clone());

    let rejected = registration
        .register("https://example.com/a\r\nSet-Cookie: x=1", Some("crlf"))
        .await;
    assert!(matches!(rejected, Err(RegistrationError::InvalidTarget(_))));

    let mapping = registration
        .register("https://example.com/a%0Ab", Some("encoded"))
        .await
        .unwrap();
    let server = server(pool);

    server.get("/crlf").await.assert_status_not_found();
    let response = server.get("/encoded").await;
    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), mapping.original.as_str());
}
