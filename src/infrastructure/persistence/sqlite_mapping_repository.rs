//! SQLite implementation of the mapping repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::repositories::MappingRepository;
use crate::error::{AppError, is_unique_violation};

const CREATE_MAPPINGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS mappings (
        token  TEXT PRIMARY KEY NOT NULL CHECK (token <> ''),
        target TEXT NOT NULL CHECK (target <> '')
    )
"#;

/// SQLite repository for short link mappings.
///
/// The pool is shared across all request handlers; SQLite's atomic
/// single-row insert and read are the only coordination required.
#[derive(Clone)]
pub struct SqliteMappingRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        self.pool.as_ref()
    }
}

#[async_trait]
impl MappingRepository for SqliteMappingRepository {
    async fn initialize(&self) -> Result<(), AppError> {
        sqlx::query(CREATE_MAPPINGS_TABLE)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| {
                AppError::storage(
                    "Failed to create mappings table",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        tracing::debug!("Mappings table ready");
        Ok(())
    }

    async fn save(&self, token: &str, target: &str) -> Result<(), AppError> {
        if token.is_empty() {
            return Err(AppError::invalid_input(
                "Token must not be empty",
                json!({ "field": "token" }),
            ));
        }
        if target.is_empty() {
            return Err(AppError::invalid_input(
                "Target URL must not be empty",
                json!({ "field": "target" }),
            ));
        }

        let result = sqlx::query("INSERT INTO mappings (token, target) VALUES (?, ?)")
            .bind(token)
            .bind(target)
            .execute(self.pool.as_ref())
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AppError::duplicate_key(
                "Token already exists",
                json!({ "token": token }),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn resolve(&self, token: &str) -> Result<String, AppError> {
        sqlx::query_scalar::<_, String>("SELECT target FROM mappings WHERE token = ?")
            .bind(token)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "token": token })))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM mappings")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
