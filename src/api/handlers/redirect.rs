//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::token_generator::is_valid_token;

/// Redirects a short token to its original URL.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// Tokens that cannot have been generated (wrong length or alphabet) are
/// answered with 404 without touching the database.
///
/// # Errors
///
/// Returns 404 Not Found if no mapping exists for the token.
/// Returns 500 if the stored target cannot be sent as a `Location` header.
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if !is_valid_token(&token) {
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "token": token }),
        ));
    }

    let target = state.link_service.resolve(&token).await?;

    let location = HeaderValue::try_from(target.as_str()).map_err(|_| {
        AppError::storage(
            "Stored target is not a valid redirect location",
            json!({ "token": token }),
        )
    })?;

    debug!(token = %token, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
