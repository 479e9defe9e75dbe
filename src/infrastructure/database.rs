//! SQLite connection pool setup.

use std::str::FromStr;
use std::time::Duration;

use serde_json::json;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use crate::error::AppError;

/// Opens a connection pool for `database_url`, creating the file if missing.
///
/// File databases run in WAL mode so readers do not block the writer.
/// In-memory databases exist per connection, so their pool is pinned to a
/// single connection that is never recycled.
///
/// # Errors
///
/// Returns [`AppError::Storage`] if the URL is malformed or the database
/// cannot be opened.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    busy_timeout: Duration,
) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| {
            AppError::storage(
                "Invalid database URL",
                json!({ "reason": e.to_string() }),
            )
        })?
        .create_if_missing(true)
        .busy_timeout(busy_timeout);

    let pool = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(
                options
                    .journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal),
            )
            .await
    };

    pool.map_err(|e| {
        AppError::storage(
            "Failed to open database",
            json!({ "reason": e.to_string() }),
        )
    })
}

/// Returns true if the URL points at a transient in-memory database.
pub fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
