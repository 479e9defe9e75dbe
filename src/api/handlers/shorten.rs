//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /s`
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://example.com/page" }
/// ```
///
/// # Response
///
/// ```json
/// { "short_url": "http://localhost:8080/AbC123xy" }
/// ```
///
/// # Errors
///
/// - 400 `invalid_input` if the body is not valid JSON or `long_url` is
///   missing or empty
/// - 500 `storage_error` if the mapping cannot be saved
/// - 500 `entropy_failure` if no random token could be generated
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::invalid_input(
            "Invalid request",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    payload.validate()?;

    let mapping = state.link_service.shorten(&payload.long_url).await?;
    let short_url = state.link_service.short_url(&mapping.token);

    Ok(Json(ShortenResponse { short_url }))
}
