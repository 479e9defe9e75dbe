mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use tinylink::api::handlers::redirect_handler;

#[tokio::test]
async fn test_redirect_success() {
    let repository = common::test_repository().await;
    common::insert_mapping(repository.pool(), "AbC123xy", "https://example.com/target").await;

    let state = common::create_test_state(repository);
    let app = Router::new()
        .route("/{token}", get(redirect_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/AbC123xy").await;

    assert_eq!(response.status_code(), 302);

    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let repository = common::test_repository().await;
    let state = common::create_test_state(repository);
    let app = Router::new()
        .route("/{token}", get(redirect_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/doesNotE").await;

    assert_eq!(response.status_code(), 404);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_malformed_token() {
    let repository = common::test_repository().await;
    let state = common::create_test_state(repository);
    let app = Router::new()
        .route("/{token}", get(redirect_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    for path in ["/doesNotExist", "/short", "/AbC1%2Fxy"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), 404, "path {path}");
    }
}

#[tokio::test]
async fn test_redirect_is_case_sensitive() {
    let repository = common::test_repository().await;
    common::insert_mapping(repository.pool(), "AbC123xy", "https://example.com/upper").await;

    let state = common::create_test_state(repository);
    let app = Router::new()
        .route("/{token}", get(redirect_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/abc123xy").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_redirect_invalid_location() {
    let repository = common::test_repository().await;
    common::insert_mapping(repository.pool(), "badHdr01", "https://example.com/\nInjected: 1").await;

    let state = common::create_test_state(repository);
    let app = Router::new()
        .route("/{token}", get(redirect_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/badHdr01").await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "storage_error"
    );
}
