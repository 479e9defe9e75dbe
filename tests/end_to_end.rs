mod common;

use std::collections::HashSet;

use axum_test::TestServer;
use serde_json::json;
use tinylink::infrastructure::persistence::SqliteMappingRepository;
use tinylink::routes::app_router;

async fn server() -> TestServer {
    server_with(common::test_repository().await)
}

fn server_with(repository: SqliteMappingRepository) -> TestServer {
    let state = common::create_test_state(repository);
    let app = app_router(state).layer(common::MockConnectInfoLayer);

    TestServer::new(app).unwrap()
}

fn token_of(short_url: &str) -> &str {
    short_url.strip_prefix("http://host/").unwrap()
}

#[tokio::test]
async fn test_shorten_then_redirect() {
    let server = server().await;

    let response = server
        .post("/s")
        .json(&json!({ "long_url": "https://example.com/page?x=1" }))
        .await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let token = token_of(json["short_url"].as_str().unwrap()).to_string();

    let response = server.get(&format!("/{token}")).await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/page?x=1");
}

#[tokio::test]
async fn test_unknown_token_is_not_found() {
    let server = server().await;

    let response = server.get("/doesNotExist").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
}

#[tokio::test]
async fn test_health_route() {
    let server = server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["status"], "healthy");
}

#[tokio::test]
async fn test_invalid_shorten_leaves_store_empty() {
    let repository = common::test_repository().await;
    let server = server_with(repository.clone());

    let response = server.post("/s").json(&json!({ "long_url": "" })).await;
    assert_eq!(response.status_code(), 400);

    assert_eq!(common::count_mappings(repository.pool()).await, 0);
}

#[tokio::test]
async fn test_shorten_is_rate_limited() {
    let server = server().await;

    let mut limited = false;
    for _ in 0..110 {
        let response = server
            .post("/s")
            .json(&json!({ "long_url": "https://example.com" }))
            .await;
        if response.status_code() == 429 {
            limited = true;
            break;
        }
        response.assert_status_ok();
    }

    assert!(limited);

    // Only link creation is limited.
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_concurrent_shorten_yields_unique_tokens() {
    let repository = common::test_repository().await;
    let state = common::create_test_state(repository.clone());

    let mut handles = Vec::new();
    for i in 0..20 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            state
                .link_service
                .shorten(&format!("https://example.com/{i}"))
                .await
        }));
    }

    let mut tokens = HashSet::new();
    for handle in handles {
        let mapping = handle.await.unwrap().unwrap();
        tokens.insert(mapping.token);
    }

    assert_eq!(tokens.len(), 20);
    assert_eq!(common::count_mappings(repository.pool()).await, 20);
}
