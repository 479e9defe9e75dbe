//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /s`         - Create a short URL (rate limited per client IP)
//! - `GET  /health`    - Health check
//! - `GET  /{token}`   - Short link redirect
//!
//! Every route is wrapped in the request tracing layer.

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
///
/// The rate limiter keys on the peer address, so serve the router with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn app_router(state: AppState) -> Router {
    let shorten_router = api::routes::shorten_routes().layer(rate_limit::layer());

    Router::new()
        .route("/health", get(health_handler))
        .route("/{token}", get(redirect_handler))
        .merge(shorten_router)
        .with_state(state)
        .layer(tracing::layer())
}
