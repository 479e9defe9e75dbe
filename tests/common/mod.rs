#![allow(dead_code)]

use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tinylink::application::services::LinkService;
use tinylink::domain::repositories::MappingRepository;
use tinylink::infrastructure::database;
use tinylink::infrastructure::persistence::SqliteMappingRepository;
use tinylink::AppError;
use tinylink::state::AppState;
use tinylink::utils::token_generator::{OsTokenGenerator, TokenGenerator};
use tower::Layer;

pub const BASE_URL: &str = "http://host";

/// Opens a private in-memory database; every call gets a fresh one.
pub async fn test_pool() -> SqlitePool {
    database::connect("sqlite::memory:", 1, Duration::from_secs(1))
        .await
        .unwrap()
}

/// Returns an initialized repository over a fresh in-memory database.
pub async fn test_repository() -> SqliteMappingRepository {
    let repository = SqliteMappingRepository::new(Arc::new(test_pool().await));
    repository.initialize().await.unwrap();
    repository
}

pub async fn insert_mapping(pool: &SqlitePool, token: &str, target: &str) {
    sqlx::query("INSERT INTO mappings (token, target) VALUES (?, ?)")
        .bind(token)
        .bind(target)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_mappings(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM mappings")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(repository: SqliteMappingRepository) -> AppState {
    create_test_state_with_generator(repository, Arc::new(OsTokenGenerator))
}

pub fn create_test_state_with_generator(
    repository: SqliteMappingRepository,
    generator: Arc<dyn TokenGenerator>,
) -> AppState {
    let link_service = Arc::new(LinkService::new(
        Arc::new(repository),
        generator,
        BASE_URL,
        3,
    ));

    AppState::new(link_service)
}

/// Generator whose entropy source always fails.
pub struct FailingTokenGenerator;

impl TokenGenerator for FailingTokenGenerator {
    fn generate(&self) -> Result<String, AppError> {
        Err(AppError::entropy(
            "Failed to obtain random bytes",
            serde_json::json!({ "reason": "entropy source unavailable" }),
        ))
    }
}

/// Inserts a fixed peer address so per-IP middleware works under `TestServer`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut()
            .insert(axum::extract::ConnectInfo(addr));
        self.inner.call(req)
    }
}
