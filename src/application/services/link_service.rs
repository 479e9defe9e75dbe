//! Link creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::Mapping;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::token_generator::TokenGenerator;
use serde_json::json;

/// Default number of generate-and-save attempts per shorten request.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Service for creating and resolving shortened links.
///
/// Combines a [`TokenGenerator`] with a [`MappingRepository`]. The generator
/// gives no uniqueness guarantee, so a token collision on save is answered by
/// regenerating, up to `max_attempts` times.
pub struct LinkService<R: MappingRepository, G: TokenGenerator + ?Sized> {
    repository: Arc<R>,
    generator: Arc<G>,
    base_url: String,
    max_attempts: usize,
}

impl<R: MappingRepository, G: TokenGenerator + ?Sized> LinkService<R, G> {
    /// Creates a new link service.
    ///
    /// `max_attempts` is clamped to at least one attempt.
    pub fn new(
        repository: Arc<R>,
        generator: Arc<G>,
        base_url: impl Into<String>,
        max_attempts: usize,
    ) -> Self {
        Self {
            repository,
            generator,
            base_url: base_url.into(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Creates a mapping for `long_url` under a freshly generated token.
    ///
    /// Any non-empty string is accepted and stored verbatim.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if `long_url` is empty; nothing is
    ///   written in that case
    /// - [`AppError::Entropy`] if token generation fails
    /// - [`AppError::Storage`] on database errors, or when every attempt
    ///   collided with an existing token
    pub async fn shorten(&self, long_url: &str) -> Result<Mapping, AppError> {
        if long_url.is_empty() {
            return Err(AppError::invalid_input(
                "long_url must not be empty",
                json!({ "field": "long_url" }),
            ));
        }

        for attempt in 1..=self.max_attempts {
            let token = self.generator.generate()?;

            match self.repository.save(&token, long_url).await {
                Ok(()) => {
                    tracing::info!(token = %token, attempt, "Short link created");
                    return Ok(Mapping::new(token, long_url));
                }
                Err(AppError::DuplicateKey { .. }) => {
                    tracing::warn!(
                        token = %token,
                        attempt,
                        max_attempts = self.max_attempts,
                        "Token collision, regenerating"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::storage(
            "Failed to allocate a unique token",
            json!({ "attempts": self.max_attempts }),
        ))
    }

    /// Returns the target URL stored for `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the token is unknown.
    /// Returns [`AppError::Storage`] on database errors.
    pub async fn resolve(&self, token: &str) -> Result<String, AppError> {
        self.repository.resolve(token).await
    }

    /// Builds the public short URL for `token`.
    ///
    /// The base URL and token are joined by exactly one `/`.
    pub fn short_url(&self, token: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), token)
    }

    /// Checks that the store answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the database is unreachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
