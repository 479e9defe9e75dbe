//! HTTP server initialization and runtime setup.
//!
//! Opens the store, ensures the schema, wires services and runs the Axum
//! server until a shutdown signal arrives.

use crate::config::Config;
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::database;
use crate::infrastructure::persistence::SqliteMappingRepository;
use crate::routes::app_router;
use crate::state::{AppLinkService, AppState};
use crate::utils::token_generator::{OsTokenGenerator, TokenGenerator};

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;

/// Opens the database and ensures the mappings table exists.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the schema cannot be
/// created. Callers treat both as fatal.
pub async fn open_store(config: &Config) -> Result<SqliteMappingRepository> {
    let pool = database::connect(
        &config.database_url,
        config.db_max_connections,
        config.busy_timeout(),
    )
    .await
    .with_context(|| format!("Failed to open database '{}'", config.database_url))?;
    tracing::info!("Connected to database");

    let repository = SqliteMappingRepository::new(Arc::new(pool));
    repository
        .initialize()
        .await
        .context("Failed to initialize database schema")?;
    tracing::info!("Database schema ready");

    Ok(repository)
}

/// Builds the link service used by both the server and the admin CLI.
pub fn build_link_service(
    config: &Config,
    repository: SqliteMappingRepository,
) -> AppLinkService {
    let generator: Arc<dyn TokenGenerator> = Arc::new(OsTokenGenerator);

    AppLinkService::new(
        Arc::new(repository),
        generator,
        config.base_url.clone(),
        config.save_max_attempts,
    )
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Database open or schema creation fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = open_store(&config).await?;
    let state = AppState::new(Arc::new(build_link_service(&config, repository)));

    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves when Ctrl-C or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
