//! API route configuration.

use crate::api::handlers::shorten_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// Link creation routes.
///
/// # Endpoints
///
/// - `POST /s` - Create a short URL
pub fn shorten_routes() -> Router<AppState> {
    Router::new().route("/s", post(shorten_handler))
}
