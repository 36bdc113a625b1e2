use bytes::Bytes;
use mockito::{Matcher, Server, ServerGuard};
use std::time::Duration;
use yacut::domain::storage::{ObjectStorage, ProviderError};
use yacut::infrastructure::storage::YandexDiskClient;

const TOKEN: &str = "test-token";
const RESOURCES: &str = "/v1/disk/resources";

fn client(server: &ServerGuard) -> YandexDiskClient {
    YandexDiskClient::new(
        format!("{}{}", server.url(), RESOURCES),
        TOKEN,
        Duration::from_secs(5),
    )
    .unwrap()
}

fn path_query(path: &str) -> Matcher {
    Matcher::UrlEncoded("path".into(), path.into())
}

#[tokio::test]
async fn test_request_upload_destination() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/disk/resources/upload")
        .match_header("authorization", "OAuth test-token")
        .match_query(Matcher::AllOf(vec![
            path_query("app:/abc_a.txt"),
            Matcher::UrlEncoded("overwrite".into(), "true".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"href": "https://uploader.example/put/1", "method": "PUT"}"#)
        .create_async()
        .await;

    let href = client(&server)
        .request_upload_destination("app:/abc_a.txt")
        .await
        .unwrap();

    assert_eq!(href, "https://uploader.example/put/1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_upload_destination_rejected() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/disk/resources/upload")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"error": "UnauthorizedError"}"#)
        .create_async()
        .await;

    let err = client(&server)
        .request_upload_destination("app:/abc_a.txt")
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Status { status: 401, .. }));
}

#[tokio::test]
async fn test_request_upload_destination_missing_href() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/disk/resources/upload")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let err = client(&server)
        .request_upload_destination("app:/abc_a.txt")
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::MissingField("href")));
}

#[tokio::test]
async fn test_transfer_bytes() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/put/1")
        .match_body("hello")
        .with_status(201)
        .create_async()
        .await;

    let destination = format!("{}/put/1", server.url());
    client(&server)
        .transfer_bytes(&destination, Bytes::from_static(b"hello"))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_transfer_bytes_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("PUT", "/put/1")
        .with_status(507)
        .with_body("insufficient storage")
        .create_async()
        .await;

    let destination = format!("{}/put/1", server.url());
    let err = client(&server)
        .transfer_bytes(&destination, Bytes::from_static(b"hello"))
        .await
        .unwrap_err();

    match err {
        ProviderError::Status { status, body } => {
            assert_eq!(status, 507);
            assert_eq!(body, "insufficient storage");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_publish_returns_public_url() {
    let mut server = Server::new_async().await;
    let publish = server
        .mock("PUT", "/v1/disk/resources/publish")
        .match_header("authorization", "OAuth test-token")
        .match_query(path_query("app:/abc_a.txt"))
        .with_status(200)
        .with_body(r#"{"href": "https://cloud-api.example/meta"}"#)
        .create_async()
        .await;
    let meta = server
        .mock("GET", RESOURCES)
        .match_query(Matcher::AllOf(vec![
            path_query("app:/abc_a.txt"),
            Matcher::UrlEncoded("fields".into(), "public_url".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"public_url": "https://yadi.sk/d/abc"}"#)
        .create_async()
        .await;

    let address = client(&server).publish("app:/abc_a.txt").await.unwrap();

    assert_eq!(address.as_deref(), Some("https://yadi.sk/d/abc"));
    publish.assert_async().await;
    meta.assert_async().await;
}

#[tokio::test]
async fn test_publish_without_public_url() {
    let mut server = Server::new_async().await;
    server
        .mock("PUT", "/v1/disk/resources/publish")
        .match_query(Matcher::Any)
        .with_status(200)
        .create_async()
        .await;
    server
        .mock("GET", RESOURCES)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let address = client(&server).publish("app:/abc_a.txt").await.unwrap();

    assert!(address.is_none());
}

#[tokio::test]
async fn test_download_address() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/disk/resources/download")
        .match_query(path_query("app:/abc_a.txt"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"href": "https://downloader.example/d/1"}"#)
        .create_async()
        .await;

    let address = client(&server)
        .download_address("app:/abc_a.txt")
        .await
        .unwrap();

    assert_eq!(address.as_deref(), Some("https://downloader.example/d/1"));
}

#[tokio::test]
async fn test_health_check() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", RESOURCES)
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    assert!(client(&server).health_check().await);
}

#[tokio::test]
async fn test_health_check_rejected_token() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", RESOURCES)
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    assert!(!client(&server).health_check().await);
}

#[test]
fn test_debug_hides_token() {
    let client = YandexDiskClient::new("https://disk.example", TOKEN, Duration::from_secs(1))
        .unwrap();

    assert!(!format!("{client:?}").contains(TOKEN));
}
