//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
///
/// A missing `long_url` deserializes to an empty string so that it fails
/// validation the same way an explicitly empty one does.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL, stored verbatim.
    #[serde(default)]
    #[validate(length(min = 1, message = "long_url must not be empty"))]
    pub long_url: String,
}

/// Response carrying the public short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
}
