//! Repository trait for token-to-URL mappings.

use crate::error::AppError;
use async_trait::async_trait;

/// Durable create-and-lookup store for short link mappings.
///
/// Implementations must enforce token uniqueness on insert; callers rely on
/// [`AppError::DuplicateKey`] to detect collisions and regenerate.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteMappingRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Ensures the mapping table exists.
    ///
    /// Safe to call on every startup; repeated calls create nothing new.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if schema creation fails.
    async fn initialize(&self) -> Result<(), AppError>;

    /// Inserts a new mapping.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if `token` or `target` is empty
    /// - [`AppError::DuplicateKey`] if `token` is already stored
    /// - [`AppError::Storage`] on database errors
    async fn save(&self, token: &str, target: &str) -> Result<(), AppError>;

    /// Looks up the target URL for `token`.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no mapping exists
    /// - [`AppError::Storage`] on database errors
    async fn resolve(&self, token: &str) -> Result<String, AppError>;

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Verifies the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store does not answer.
    async fn ping(&self) -> Result<(), AppError>;
}
