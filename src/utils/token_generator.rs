//! Short token generation and validation.
//!
//! Tokens are drawn from the operating system entropy source and encoded as
//! URL-safe base64 without padding. Uniqueness is not guaranteed here; the
//! store rejects duplicates and the caller regenerates.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Number of random bytes drawn per token.
const TOKEN_LENGTH_BYTES: usize = 6;

/// Length of an encoded token (6 bytes -> 8 base64 characters).
pub const TOKEN_LENGTH: usize = 8;

/// Source of fresh short tokens.
///
/// Abstracted so services can be tested with deterministic sequences.
#[cfg_attr(test, mockall::automock)]
pub trait TokenGenerator: Send + Sync {
    /// Produces a new token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Entropy`] if no random bytes could be obtained.
    fn generate(&self) -> Result<String, AppError>;
}

/// Generator backed by the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsTokenGenerator;

impl TokenGenerator for OsTokenGenerator {
    fn generate(&self) -> Result<String, AppError> {
        generate_token()
    }
}

/// Generates a cryptographically secure random token.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing an 8-character token over `A-Z a-z 0-9 - _`.
///
/// # Errors
///
/// Returns [`AppError::Entropy`] if the system random number generator fails.
/// There is no fallback to a weaker source.
pub fn generate_token() -> Result<String, AppError> {
    let mut buffer = [0u8; TOKEN_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::entropy(
            "Failed to obtain random bytes",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Returns true if `token` has the generated length and alphabet.
///
/// ```ignore
/// assert!(is_valid_token("AbC123xy"));
/// assert!(!is_valid_token("short"));
/// assert!(!is_valid_token("bad/char"));
/// ```
pub fn is_valid_token(token: &str) -> bool {
    token.len() == TOKEN_LENGTH
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
